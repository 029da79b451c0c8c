//! Error types for contour validation.

/// Errors from contour construction and validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DtwError {
    /// Returned when an empty slice is provided as a contour.
    #[error("contour must be non-empty")]
    EmptyContour,

    /// Returned when a contour contains NaN, infinity, or negative infinity.
    #[error("contour contains non-finite value at index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite value found.
        index: usize,
    },
}
