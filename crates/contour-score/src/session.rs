//! Play/draw/evaluate round state, independent of any UI or audio backend.

use rand::Rng;
use tracing::{debug, instrument};

use contour_melody::{NoteTiming, PatternCatalog, PlaybackSchedule, ReferencePattern};
use contour_trace::TraceRecorder;

use crate::error::SessionError;
use crate::scorer::{Evaluation, Scorer};

/// One player's rounds: the catalog, an injected random source, the melody
/// last played, and the trace being drawn.
///
/// Each session owns its own trace buffer, so independent sessions can be
/// evaluated concurrently.
#[derive(Debug)]
pub struct Session<R> {
    catalog: PatternCatalog,
    rng: R,
    scorer: Scorer,
    timing: NoteTiming,
    current: Option<ReferencePattern>,
    recorder: TraceRecorder,
}

impl<R: Rng> Session<R> {
    #[must_use]
    pub fn new(catalog: PatternCatalog, rng: R, scorer: Scorer) -> Self {
        Self {
            catalog,
            rng,
            scorer,
            timing: NoteTiming::default(),
            current: None,
            recorder: TraceRecorder::new(),
        }
    }

    /// Set the note timing used for playback schedules.
    #[must_use]
    pub fn with_timing(mut self, timing: NoteTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Pick a new reference melody, clear the drawing, and return the
    /// schedule the caller should play.
    pub fn play(&mut self) -> PlaybackSchedule {
        let pattern = self.catalog.select(&mut self.rng).clone();
        debug!(pattern = pattern.name(), "new round");
        let schedule = PlaybackSchedule::new(&pattern, self.timing);
        self.current = Some(pattern);
        self.recorder.clear();
        schedule
    }

    #[must_use]
    pub fn current(&self) -> Option<&ReferencePattern> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn recorder(&self) -> &TraceRecorder {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut TraceRecorder {
        &mut self.recorder
    }

    /// Discard the drawing but keep the current melody.
    pub fn reset(&mut self) {
        self.recorder.clear();
    }

    /// Score the current drawing against the current melody.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SessionError::NoReference`] | [`play`](Self::play) has not been called |
    /// | [`SessionError::NothingDrawn`] | The trace is empty |
    /// | [`SessionError::Score`] | Preprocessing or scoring failed |
    #[instrument(skip(self))]
    pub fn evaluate(&self, extent: f64) -> Result<Evaluation, SessionError> {
        let reference = self.current.as_ref().ok_or(SessionError::NoReference)?;
        let trace = self.recorder.trace();
        if trace.is_empty() {
            return Err(SessionError::NothingDrawn);
        }
        Ok(self
            .scorer
            .evaluate(reference.pitches(), trace.as_slice(), extent)?)
    }
}
