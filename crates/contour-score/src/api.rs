//! Default-configured entry points for callers that only need the basics.

use rand::Rng;

use contour_dtw::Contour;
use contour_melody::{PatternCatalog, ReferencePattern};
use contour_trace::{Preprocessor, TraceError};

use crate::error::ScoreError;
use crate::scorer::{ScoreResult, Scorer};

/// The built-in reference catalog.
#[must_use]
pub fn get_reference_catalog() -> PatternCatalog {
    PatternCatalog::standard()
}

/// Choose a reference uniformly from `catalog` using the caller's random source.
pub fn select_reference<'a, R: Rng + ?Sized>(
    catalog: &'a PatternCatalog,
    rng: &mut R,
) -> &'a ReferencePattern {
    catalog.select(rng)
}

/// Flip, normalize, smooth (window 2), and resample a raw trace to `target_length` points.
///
/// # Errors
///
/// Returns [`TraceError::EmptyInput`] when `raw_trace` is empty; see
/// [`Preprocessor::run`] for the rest.
pub fn preprocess_trace(
    raw_trace: &[f64],
    axis_extent: f64,
    target_length: usize,
) -> Result<Contour, TraceError> {
    Preprocessor::new().run(raw_trace, axis_extent, target_length)
}

/// Score a normalized candidate against a reference with threshold 0.1.
///
/// # Errors
///
/// Returns [`ScoreError::InvalidSequence`] when either input is empty or non-finite.
pub fn score(reference: &[f64], candidate: &[f64]) -> Result<ScoreResult, ScoreError> {
    Scorer::default().score(reference, candidate)
}
