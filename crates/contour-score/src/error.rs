//! Error types for scoring and session evaluation.

use std::fmt;

use contour_dtw::DtwError;
use contour_trace::TraceError;

/// Which input of a scoring call was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceRole {
    Reference,
    Candidate,
}

impl fmt::Display for SequenceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => f.write_str("reference"),
            Self::Candidate => f.write_str("candidate"),
        }
    }
}

/// Errors from scorer configuration and scoring.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// Returned when a scored sequence is empty or holds a non-finite value.
    #[error("invalid {role} sequence")]
    InvalidSequence {
        /// Which input was rejected.
        role: SequenceRole,
        /// Underlying validation error.
        source: DtwError,
    },

    /// Returned when the match threshold is not positive and finite.
    #[error("match threshold must be positive and finite, got {threshold}")]
    InvalidThreshold {
        /// The rejected threshold.
        threshold: f64,
    },

    /// Returned when the normalization epsilon is not positive and finite.
    #[error("epsilon must be positive and finite, got {epsilon}")]
    InvalidEpsilon {
        /// The rejected epsilon.
        epsilon: f64,
    },

    /// Wraps a preprocessing error from the raw trace or the reference.
    #[error("preprocessing failed: {0}")]
    Trace(#[from] TraceError),
}

/// Errors from evaluating the current state of a [`Session`](crate::Session).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Returned when no reference melody has been played yet.
    #[error("play the melody first")]
    NoReference,

    /// Returned when no samples were drawn since the last reset.
    #[error("draw something first")]
    NothingDrawn,

    /// Wraps a scoring error.
    #[error(transparent)]
    Score(#[from] ScoreError),
}
