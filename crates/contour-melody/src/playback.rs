//! Timed playback plans for reference patterns, and live pitch feedback mapping.

use std::time::Duration;

use crate::catalog::ReferencePattern;
use crate::error::MelodyError;

/// How long each control point sounds and how long the pitch glides into it.
///
/// # Defaults
///
/// | Parameter | Default |
/// |-----------|---------|
/// | `note`    | 300 ms  |
/// | `glide`   | 100 ms  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteTiming {
    pub note: Duration,
    pub glide: Duration,
}

impl Default for NoteTiming {
    fn default() -> Self {
        Self {
            note: Duration::from_millis(300),
            glide: Duration::from_millis(100),
        }
    }
}

/// One tone in a playback schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledNote {
    pub frequency_hz: f64,
    /// Offset from the start of playback.
    pub start: Duration,
    pub duration: Duration,
    /// Time to ramp from the previous frequency to this one.
    pub glide: Duration,
}

/// Back-to-back notes, one per control point of a pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSchedule {
    pattern: String,
    notes: Vec<ScheduledNote>,
}

impl PlaybackSchedule {
    #[must_use]
    pub fn new(pattern: &ReferencePattern, timing: NoteTiming) -> Self {
        let notes = pattern
            .pitches()
            .iter()
            .zip(0u32..)
            .map(|(&frequency_hz, i)| ScheduledNote {
                frequency_hz,
                start: timing.note * i,
                duration: timing.note,
                glide: timing.glide,
            })
            .collect();
        Self {
            pattern: pattern.name().to_string(),
            notes,
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn notes(&self) -> &[ScheduledNote] {
        &self.notes
    }

    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.notes
            .last()
            .map_or(Duration::ZERO, |n| n.start + n.duration)
    }

    /// The note sounding `elapsed` after playback started, if any.
    #[must_use]
    pub fn note_at(&self, elapsed: Duration) -> Option<&ScheduledNote> {
        self.notes
            .iter()
            .find(|n| n.start <= elapsed && elapsed < n.start + n.duration)
    }
}

/// Linear mapping between a drawing axis and a pitch band.
///
/// # Defaults
///
/// | Parameter | Default |
/// |-----------|---------|
/// | `low`     | 100 Hz  |
/// | `high`    | 600 Hz  |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchRange {
    low: f64,
    high: f64,
}

impl Default for PitchRange {
    fn default() -> Self {
        Self {
            low: 100.0,
            high: 600.0,
        }
    }
}

impl PitchRange {
    /// # Errors
    ///
    /// Returns [`MelodyError::InvalidPitchRange`] unless both bounds are
    /// finite and `low < high`.
    pub fn new(low: f64, high: f64) -> Result<Self, MelodyError> {
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(MelodyError::InvalidPitchRange { low, high });
        }
        Ok(Self { low, high })
    }

    #[must_use]
    pub fn low(&self) -> f64 {
        self.low
    }

    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Pitch for a screen position on an axis of size `extent`, where
    /// `position == extent` (bottom) is `low` and `0` (top) is `high`.
    /// Positions outside the axis extrapolate linearly.
    ///
    /// # Errors
    ///
    /// Returns [`MelodyError::InvalidExtent`] unless `extent` is positive and finite.
    pub fn pitch_for_position(&self, position: f64, extent: f64) -> Result<f64, MelodyError> {
        if !extent.is_finite() || extent <= 0.0 {
            return Err(MelodyError::InvalidExtent { extent });
        }
        Ok(self.low + (extent - position) / extent * (self.high - self.low))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PatternCatalog;

    #[test]
    fn schedule_has_one_note_per_point() {
        let catalog = PatternCatalog::standard();
        let pattern = catalog.get("peak").unwrap();
        let schedule = PlaybackSchedule::new(pattern, NoteTiming::default());

        assert_eq!(schedule.pattern(), "peak");
        assert_eq!(schedule.notes().len(), 11);
        assert_eq!(schedule.notes()[5].frequency_hz, 350.0);
        assert_eq!(schedule.notes()[5].start, Duration::from_millis(1500));
        assert_eq!(schedule.total_duration(), Duration::from_millis(3300));
    }

    #[test]
    fn note_at_finds_sounding_note() {
        let catalog = PatternCatalog::standard();
        let schedule = PlaybackSchedule::new(catalog.get("rising").unwrap(), NoteTiming::default());

        let first = schedule.note_at(Duration::ZERO).unwrap();
        assert_eq!(first.frequency_hz, 100.0);
        let second = schedule.note_at(Duration::from_millis(300)).unwrap();
        assert_eq!(second.frequency_hz, 150.0);
        assert!(schedule.note_at(Duration::from_millis(3300)).is_none());
    }

    #[test]
    fn custom_timing() {
        let catalog = PatternCatalog::standard();
        let timing = NoteTiming {
            note: Duration::from_millis(100),
            glide: Duration::ZERO,
        };
        let schedule = PlaybackSchedule::new(catalog.get("falling").unwrap(), timing);
        assert_eq!(schedule.total_duration(), Duration::from_millis(1100));
        assert!(schedule.notes().iter().all(|n| n.glide.is_zero()));
    }

    #[test]
    fn position_maps_bottom_to_low_and_top_to_high() {
        let range = PitchRange::default();
        assert_eq!(range.pitch_for_position(400.0, 400.0).unwrap(), 100.0);
        assert_eq!(range.pitch_for_position(0.0, 400.0).unwrap(), 600.0);
        assert_eq!(range.pitch_for_position(200.0, 400.0).unwrap(), 350.0);
    }

    #[test]
    fn position_rejects_bad_extent() {
        let range = PitchRange::default();
        assert!(matches!(
            range.pitch_for_position(10.0, 0.0),
            Err(MelodyError::InvalidExtent { .. })
        ));
    }

    #[test]
    fn pitch_range_validation() {
        assert!(PitchRange::new(100.0, 600.0).is_ok());
        assert!(PitchRange::new(600.0, 100.0).is_err());
        assert!(PitchRange::new(f64::NAN, 100.0).is_err());
    }
}
