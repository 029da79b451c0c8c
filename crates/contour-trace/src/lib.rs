//! Raw drawing traces and the preprocessing pipeline that turns them into
//! contours comparable against a reference melody.
//!
//! Pipeline order: axis flip, min/max normalization, moving-average smoothing,
//! nearest-floor resampling. Every step is pure and returns a new
//! [`Contour`](contour_dtw::Contour).

mod error;
mod preprocess;
mod reader;
mod recorder;

pub use error::TraceError;
pub use preprocess::{Preprocessor, flip_axis, normalize, resample, smooth};
pub use reader::TraceReader;
pub use recorder::{RawTrace, TraceRecorder};
