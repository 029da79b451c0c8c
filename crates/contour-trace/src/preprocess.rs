//! Trace preprocessing: axis flip, min/max normalization, smoothing, resampling.

use contour_dtw::{Contour, DtwError};
use tracing::{debug, instrument};

use crate::error::TraceError;

/// Wrap pipeline output, reporting overflow from the given step.
fn finish(stage: &'static str, values: Vec<f64>) -> Result<Contour, TraceError> {
    Contour::new(values).map_err(|_| TraceError::Overflow { stage })
}

/// Validate raw samples into a contour, mapping errors to trace terms.
fn validate_raw(raw: &[f64]) -> Result<Contour, TraceError> {
    Contour::new(raw.to_vec()).map_err(|e| match e {
        DtwError::EmptyContour => TraceError::EmptyInput,
        DtwError::NonFiniteValue { index } => TraceError::NonFiniteSample { index },
    })
}

/// Invert screen coordinates so that larger values mean higher pitch:
/// `flipped[i] = extent - raw[i]`.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`TraceError::EmptyInput`] | `raw` is empty |
/// | [`TraceError::NonFiniteSample`] | A sample is NaN or infinite |
/// | [`TraceError::InvalidExtent`] | `extent` is not finite or not positive |
/// | [`TraceError::Overflow`] | A flipped value is not finite |
pub fn flip_axis(raw: &[f64], extent: f64) -> Result<Contour, TraceError> {
    let raw = validate_raw(raw)?;
    if !extent.is_finite() || extent <= 0.0 {
        return Err(TraceError::InvalidExtent { extent });
    }
    finish("axis flip", raw.as_ref().iter().map(|&v| extent - v).collect())
}

/// Map values linearly into `[0, 1]` using the contour's own min and max.
///
/// A contour with no variation maps to all zeros.
///
/// # Errors
///
/// Returns [`TraceError::Overflow`] when `max - min` is not representable.
pub fn normalize(contour: &Contour) -> Result<Contour, TraceError> {
    let (min, max) = contour.min_max();
    if max == min {
        return finish("normalize", vec![0.0; contour.len()]);
    }
    let range = max - min;
    finish(
        "normalize",
        contour.as_ref().iter().map(|&v| (v - min) / range).collect(),
    )
}

/// Centered moving average with the window clipped at the boundaries.
///
/// Index `i` averages `[i - window/2, i + window/2]` intersected with the
/// valid index range, so the window shrinks at the edges instead of padding
/// or wrapping. A window below 2 leaves the contour unchanged.
///
/// # Errors
///
/// Returns [`TraceError::Overflow`] when a window sum is not representable.
pub fn smooth(contour: &Contour, window: usize) -> Result<Contour, TraceError> {
    let data = contour.as_ref();
    let half = window / 2;
    let last = data.len() - 1;
    let smoothed = (0..data.len())
        .map(|i| {
            let subset = &data[i.saturating_sub(half)..=(i + half).min(last)];
            subset.iter().sum::<f64>() / subset.len() as f64
        })
        .collect();
    finish("smooth", smoothed)
}

/// Resample to exactly `target_len` points by nearest-floor indexing:
/// `out[i] = in[floor(i * (len / target_len))]`. No interpolation.
///
/// # Errors
///
/// Returns [`TraceError::InvalidTargetLength`] when `target_len` is zero.
pub fn resample(contour: &Contour, target_len: usize) -> Result<Contour, TraceError> {
    if target_len == 0 {
        return Err(TraceError::InvalidTargetLength);
    }
    let data = contour.as_ref();
    let step = data.len() as f64 / target_len as f64;
    let last = data.len() - 1;
    let resampled = (0..target_len)
        .map(|i| data[((i as f64 * step).floor() as usize).min(last)])
        .collect();
    finish("resample", resampled)
}

/// Configuration for the raw-trace preprocessing pipeline.
///
/// # Defaults
///
/// | Parameter          | Default |
/// |--------------------|---------|
/// | `smoothing_window` | 2       |
/// | `flip_axis`        | `true`  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preprocessor {
    smoothing_window: usize,
    flip_axis: bool,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Preprocessor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            smoothing_window: 2,
            flip_axis: true,
        }
    }

    /// Set the moving-average window size.
    #[must_use]
    pub fn with_smoothing_window(mut self, smoothing_window: usize) -> Self {
        self.smoothing_window = smoothing_window;
        self
    }

    /// Set whether samples are screen coordinates that grow downwards.
    #[must_use]
    pub fn with_flip_axis(mut self, flip_axis: bool) -> Self {
        self.flip_axis = flip_axis;
        self
    }

    #[must_use]
    pub fn smoothing_window(&self) -> usize {
        self.smoothing_window
    }

    /// Turn a raw trace into a normalized contour of `target_len` points.
    ///
    /// `extent` is the size of the sampled axis (e.g. canvas height) and is
    /// only used when the axis flip is enabled.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TraceError::EmptyInput`] | `raw` is empty |
    /// | [`TraceError::NonFiniteSample`] | A sample is NaN or infinite |
    /// | [`TraceError::InvalidTargetLength`] | `target_len` is zero |
    /// | [`TraceError::InvalidExtent`] | Flip enabled and `extent` is not positive and finite |
    /// | [`TraceError::Overflow`] | An intermediate value became non-finite |
    #[instrument(skip(self, raw), fields(samples = raw.len()))]
    pub fn run(&self, raw: &[f64], extent: f64, target_len: usize) -> Result<Contour, TraceError> {
        if raw.is_empty() {
            return Err(TraceError::EmptyInput);
        }
        if target_len == 0 {
            return Err(TraceError::InvalidTargetLength);
        }

        let oriented = if self.flip_axis {
            flip_axis(raw, extent)?
        } else {
            validate_raw(raw)?
        };
        let normalized = normalize(&oriented)?;
        let smoothed = smooth(&normalized, self.smoothing_window)?;
        let resampled = resample(&smoothed, target_len)?;

        debug!(
            window = self.smoothing_window,
            output_len = resampled.len(),
            "trace preprocessed"
        );
        Ok(resampled)
    }
}
