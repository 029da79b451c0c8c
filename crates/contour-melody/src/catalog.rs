//! The fixed catalog of reference pitch contours.

use rand::Rng;
use tracing::debug;

use contour_dtw::Contour;

use crate::error::MelodyError;

const POINTS: usize = 11;
const STEP_HZ: f64 = 50.0;
const LOW_HZ: f64 = 100.0;
const HIGH_HZ: f64 = 600.0;

/// A named, immutable reference contour.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePattern {
    name: String,
    contour: Contour,
}

impl ReferencePattern {
    /// Build a pattern from raw pitch values.
    ///
    /// # Errors
    ///
    /// Returns [`MelodyError::InvalidPattern`] if `pitches` is empty or holds
    /// a non-finite value.
    pub fn new(name: impl Into<String>, pitches: Vec<f64>) -> Result<Self, MelodyError> {
        let name = name.into();
        match Contour::new(pitches) {
            Ok(contour) => Ok(Self { name, contour }),
            Err(source) => Err(MelodyError::InvalidPattern { name, source }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn contour(&self) -> &Contour {
        &self.contour
    }

    /// Pitch values in Hz, one per control point.
    #[must_use]
    pub fn pitches(&self) -> &[f64] {
        self.contour.as_ref()
    }
}

/// An ordered, non-empty set of uniquely named reference patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternCatalog {
    patterns: Vec<ReferencePattern>,
}

impl PatternCatalog {
    /// Build a catalog from the given patterns.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MelodyError::EmptyCatalog`] | `patterns` is empty |
    /// | [`MelodyError::DuplicatePattern`] | Two patterns share a name |
    pub fn new(patterns: Vec<ReferencePattern>) -> Result<Self, MelodyError> {
        if patterns.is_empty() {
            return Err(MelodyError::EmptyCatalog);
        }
        for (i, p) in patterns.iter().enumerate() {
            if patterns[..i].iter().any(|q| q.name == p.name) {
                return Err(MelodyError::DuplicatePattern {
                    name: p.name.clone(),
                });
            }
        }
        Ok(Self { patterns })
    }

    /// The four built-in 11-point contours spanning 100–600 Hz in 50 Hz steps:
    /// `rising`, `falling`, `peak` (rise then fall) and `trough` (fall then rise).
    #[must_use]
    pub fn standard() -> Self {
        let ramp = |start: f64, dir: f64| -> Vec<f64> {
            (0..POINTS).map(|i| start + dir * STEP_HZ * i as f64).collect()
        };
        let vee = |start: f64, dir: f64| -> Vec<f64> {
            let apex = POINTS / 2;
            (0..POINTS)
                .map(|i| start + dir * STEP_HZ * (apex - apex.abs_diff(i)) as f64)
                .collect()
        };

        [
            ("rising", ramp(LOW_HZ, 1.0)),
            ("falling", ramp(HIGH_HZ, -1.0)),
            ("peak", vee(LOW_HZ, 1.0)),
            ("trough", vee(HIGH_HZ, -1.0)),
        ]
        .into_iter()
        .map(|(name, pitches)| ReferencePattern::new(name, pitches))
        .collect::<Result<Vec<_>, _>>()
        .and_then(Self::new)
        .expect("built-in patterns are finite, non-empty and uniquely named")
    }

    /// Choose a pattern uniformly at random from `rng`.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> &ReferencePattern {
        let idx = rng.gen_range(0..self.patterns.len());
        let pattern = &self.patterns[idx];
        debug!(idx, name = pattern.name(), "reference selected");
        pattern
    }

    /// Look up a pattern by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ReferencePattern> {
        self.patterns.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.patterns.iter().map(ReferencePattern::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferencePattern> {
        self.patterns.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ReferencePattern] {
        &self.patterns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Always `false`: construction rejects empty catalogs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
