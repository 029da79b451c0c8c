//! Error types for trace capture, preprocessing, and trace file reading.

use std::path::PathBuf;

/// Errors from trace preprocessing and trace file reading.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// Returned when the raw trace holds no samples.
    #[error("raw trace is empty")]
    EmptyInput,

    /// Returned when a raw sample is NaN or infinite.
    #[error("raw trace contains non-finite sample at index {index}")]
    NonFiniteSample {
        /// Position of the first non-finite sample.
        index: usize,
    },

    /// Returned when the axis extent is not a positive finite number.
    #[error("axis extent must be positive and finite, got {extent}")]
    InvalidExtent {
        /// The rejected extent.
        extent: f64,
    },

    /// Returned when resampling to zero points is requested.
    #[error("target length must be at least 1")]
    InvalidTargetLength,

    /// Returned when an intermediate value overflowed to a non-finite number.
    #[error("{stage} produced a non-finite value")]
    Overflow {
        /// Pipeline step that overflowed.
        stage: &'static str,
    },

    /// Returned when the trace file does not exist or is unreadable.
    #[error("trace file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the CSV header has no columns at all.
    #[error("trace file {path} has no columns")]
    MissingColumn {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when a cell cannot be parsed as a finite number.
    #[error("invalid sample in {path}: row {row_index}, raw value \"{raw}\"")]
    InvalidSample {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// The raw cell text.
        raw: String,
    },
}
