//! Scoring configuration.

use crate::error::ScoreError;

/// Configuration for [`Scorer`](crate::Scorer).
///
/// Construct via [`ScoreConfig::new`], then chain `with_*` methods. Values are
/// validated when the scorer is built.
///
/// # Defaults
///
/// | Parameter          | Default  |
/// |--------------------|----------|
/// | `threshold`        | 0.1      |
/// | `epsilon`          | 0.0001   |
/// | `smoothing_window` | 2        |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreConfig {
    pub(crate) threshold: f64,
    pub(crate) epsilon: f64,
    pub(crate) smoothing_window: usize,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            threshold: 0.1,
            epsilon: 1e-4,
            smoothing_window: 2,
        }
    }

    /// Set the score below which a drawing counts as a match.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the constant added to the reference length before dividing.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the moving-average window applied to raw traces.
    #[must_use]
    pub fn with_smoothing_window(mut self, smoothing_window: usize) -> Self {
        self.smoothing_window = smoothing_window;
        self
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[must_use]
    pub fn smoothing_window(&self) -> usize {
        self.smoothing_window
    }

    pub(crate) fn validate(&self) -> Result<(), ScoreError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ScoreError::InvalidThreshold {
                threshold: self.threshold,
            });
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ScoreError::InvalidEpsilon {
                epsilon: self.epsilon,
            });
        }
        Ok(())
    }
}
