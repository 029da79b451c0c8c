//! Error types for the pattern catalog and pitch mapping.

use contour_dtw::DtwError;

/// Errors from catalog construction and pitch mapping.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MelodyError {
    /// Returned when a catalog is built without any pattern.
    #[error("pattern catalog must contain at least one pattern")]
    EmptyCatalog,

    /// Returned when two patterns share a name.
    #[error("duplicate pattern name \"{name}\"")]
    DuplicatePattern {
        /// The repeated name.
        name: String,
    },

    /// Returned when a pattern's control points do not form a valid contour.
    #[error("invalid pattern \"{name}\"")]
    InvalidPattern {
        /// Name of the offending pattern.
        name: String,
        /// Underlying validation error.
        source: DtwError,
    },

    /// Returned when a position extent is not a positive finite number.
    #[error("position extent must be positive and finite, got {extent}")]
    InvalidExtent {
        /// The rejected extent.
        extent: f64,
    },

    /// Returned when a pitch range is empty, inverted, or non-finite.
    #[error("invalid pitch range {low}..{high}")]
    InvalidPitchRange {
        /// Lower bound in Hz.
        low: f64,
        /// Upper bound in Hz.
        high: f64,
    },
}
