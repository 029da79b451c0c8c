//! Scoring of hand-drawn contours against reference melodies.
//!
//! The reference is min/max-normalized, compared with the preprocessed
//! drawing by DTW, and the distance is divided by the reference length to
//! give a score that is thresholded into a [`Verdict`].
//!
//! The free functions in this crate are the entry points for callers that
//! need nothing beyond the defaults; [`Scorer`] and [`Session`] expose the
//! configurable pieces.

mod api;
mod config;
mod error;
mod scorer;
mod session;

pub use api::{get_reference_catalog, preprocess_trace, score, select_reference};
pub use config::ScoreConfig;
pub use error::{ScoreError, SequenceRole, SessionError};
pub use scorer::{Classification, Evaluation, ScoreResult, Scorer, Verdict};
pub use session::Session;
