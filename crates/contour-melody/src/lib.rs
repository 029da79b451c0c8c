//! Reference melodies: the fixed pattern catalog, uniform random selection
//! with caller-supplied randomness, and pure playback scheduling.
//!
//! Nothing here touches audio or timers. A [`PlaybackSchedule`] only
//! describes when each note should sound; the caller performs playback.

mod catalog;
mod error;
mod playback;

pub use catalog::{PatternCatalog, ReferencePattern};
pub use error::MelodyError;
pub use playback::{NoteTiming, PitchRange, PlaybackSchedule, ScheduledNote};
