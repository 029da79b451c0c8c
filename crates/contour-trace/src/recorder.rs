//! Raw trace buffer and the gesture lifecycle that fills it.

use tracing::debug;

/// Ordered raw samples (e.g. vertical pointer positions) from one gesture.
///
/// May be empty and is not validated on push; validation happens when the
/// trace is preprocessed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTrace(Vec<f64>);

impl RawTrace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: f64) {
        self.0.push(sample);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl From<Vec<f64>> for RawTrace {
    fn from(samples: Vec<f64>) -> Self {
        Self(samples)
    }
}

impl AsRef<[f64]> for RawTrace {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Accumulates samples while a drawing gesture is active.
///
/// Starting a gesture discards the previous trace; samples arriving outside a
/// gesture are ignored.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    trace: RawTrace,
    drawing: bool,
}

impl TraceRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new gesture, discarding any previously captured samples.
    pub fn begin_gesture(&mut self) {
        self.trace.clear();
        self.drawing = true;
    }

    /// Append a sample if a gesture is active. Returns whether it was kept.
    pub fn record(&mut self, sample: f64) -> bool {
        if self.drawing {
            self.trace.push(sample);
        }
        self.drawing
    }

    /// Stop capturing. The samples stay available for evaluation.
    pub fn end_gesture(&mut self) {
        if self.drawing {
            debug!(samples = self.trace.len(), "gesture finished");
        }
        self.drawing = false;
    }

    /// Drop all samples and stop capturing.
    pub fn clear(&mut self) {
        self.trace.clear();
        self.drawing = false;
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    #[must_use]
    pub fn trace(&self) -> &RawTrace {
        &self.trace
    }

    /// Move the captured trace out, leaving the recorder empty and idle.
    pub fn take(&mut self) -> RawTrace {
        self.drawing = false;
        std::mem::take(&mut self.trace)
    }
}
