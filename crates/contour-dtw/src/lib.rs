//! Dynamic Time Warping over pitch contours.
//!
//! Pure math library with no I/O. Provides validated contour types, the
//! classic absolute-difference DTW distance, the full accumulated cost matrix
//! for diagnostics, warping path extraction, and a parallel one-vs-many
//! nearest-contour search.

mod distance;
mod dtw;
mod error;
mod matrix;
mod path;
mod series;

pub use distance::DtwDistance;
pub use dtw::Dtw;
pub use error::DtwError;
pub use matrix::CostMatrix;
pub use path::{WarpingPath, WarpingStep};
pub use series::{Contour, ContourView};
