//! Reference-vs-drawing scoring and the match verdict.

use std::fmt;

use contour_dtw::{Contour, ContourView, Dtw, DtwDistance, DtwError};
use contour_melody::PatternCatalog;
use contour_trace::{Preprocessor, normalize};
use tracing::{debug, info, instrument};

use crate::config::ScoreConfig;
use crate::error::{ScoreError, SequenceRole};

/// Binary outcome of comparing a score with the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    NoMatch,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match => f.write_str("good match"),
            Self::NoMatch => f.write_str("try again"),
        }
    }
}

/// Outcome of one scoring call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    /// Raw DTW distance between the normalized reference and the candidate.
    pub distance: DtwDistance,
    /// `distance / (reference_len + epsilon)`.
    pub normalized_score: f64,
    pub verdict: Verdict,
}

impl ScoreResult {
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.verdict == Verdict::Match
    }
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DTW score: {:.3} - {}", self.normalized_score, self.verdict)
    }
}

/// A scored raw trace together with the contour it was reduced to.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub candidate: Contour,
    pub result: ScoreResult,
}

/// The catalog pattern a drawing is closest to.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub pattern: String,
    pub distance: DtwDistance,
}

/// Scores candidates against references. Stateless apart from its
/// configuration, so it may be shared across concurrent evaluations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    config: ScoreConfig,
    dtw: Dtw,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            config: ScoreConfig::new(),
            dtw: Dtw::new(),
        }
    }
}

fn view(values: &[f64], role: SequenceRole) -> Result<ContourView<'_>, ScoreError> {
    ContourView::new(values).map_err(|source| ScoreError::InvalidSequence { role, source })
}

impl Scorer {
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ScoreError::InvalidThreshold`] | threshold is not positive and finite |
    /// | [`ScoreError::InvalidEpsilon`] | epsilon is not positive and finite |
    pub fn new(config: ScoreConfig) -> Result<Self, ScoreError> {
        config.validate()?;
        Ok(Self {
            config,
            dtw: Dtw::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    /// Score a candidate contour against a reference contour.
    ///
    /// The reference is min/max-normalized before comparison; the candidate
    /// is used as given and is expected to be normalized already.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ScoreError::InvalidSequence`] | Either input is empty or non-finite |
    /// | [`ScoreError::Trace`] | Normalizing the reference overflowed |
    #[instrument(skip_all, fields(n = reference.len(), m = candidate.len()))]
    pub fn score(&self, reference: &[f64], candidate: &[f64]) -> Result<ScoreResult, ScoreError> {
        let reference = view(reference, SequenceRole::Reference)?;
        let candidate = view(candidate, SequenceRole::Candidate)?;
        let normalized = normalize(&Contour::from(reference))?;

        let distance = self.dtw.distance(normalized.as_view(), candidate);
        let result = self.judge(distance, reference.len());
        debug!(
            distance = result.distance.value(),
            score = result.normalized_score,
            verdict = %result.verdict,
            "candidate scored"
        );
        Ok(result)
    }

    /// Preprocess a raw trace to the reference length and score it.
    ///
    /// `extent` is the size of the drawing axis the samples were taken on.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ScoreError::InvalidSequence`] | `reference` is empty or non-finite |
    /// | [`ScoreError::Trace`] | The raw trace failed preprocessing (e.g. it is empty) |
    #[instrument(skip_all, fields(samples = raw.len(), extent))]
    pub fn evaluate(
        &self,
        reference: &[f64],
        raw: &[f64],
        extent: f64,
    ) -> Result<Evaluation, ScoreError> {
        view(reference, SequenceRole::Reference)?;
        let candidate = Preprocessor::new()
            .with_smoothing_window(self.config.smoothing_window)
            .run(raw, extent, reference.len())?;
        let result = self.score(reference, candidate.as_ref())?;
        info!(score = result.normalized_score, verdict = %result.verdict, "drawing evaluated");
        Ok(Evaluation { candidate, result })
    }

    /// Find the catalog pattern whose normalized contour is closest to `candidate`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ScoreError::InvalidSequence`] | `candidate` is empty or non-finite |
    /// | [`ScoreError::Trace`] | Normalizing a pattern overflowed |
    pub fn classify(
        &self,
        catalog: &PatternCatalog,
        candidate: &[f64],
    ) -> Result<Classification, ScoreError> {
        let candidate = view(candidate, SequenceRole::Candidate)?;
        let references = catalog
            .iter()
            .map(|p| normalize(p.contour()))
            .collect::<Result<Vec<_>, _>>()?;
        let views: Vec<ContourView<'_>> = references.iter().map(Contour::as_view).collect();

        let (idx, distance) = self.dtw.nearest(candidate, &views).ok_or(
            ScoreError::InvalidSequence {
                role: SequenceRole::Reference,
                source: DtwError::EmptyContour,
            },
        )?;
        Ok(Classification {
            pattern: catalog.as_slice()[idx].name().to_string(),
            distance,
        })
    }

    fn judge(&self, distance: DtwDistance, reference_len: usize) -> ScoreResult {
        // Dividing by the reference length is a heuristic bound, not the true
        // maximum cost; the threshold is calibrated against it.
        let normalized_score = distance.value() / (reference_len as f64 + self.config.epsilon);
        let verdict = if normalized_score < self.config.threshold {
            Verdict::Match
        } else {
            Verdict::NoMatch
        };
        ScoreResult {
            distance,
            normalized_score,
            verdict,
        }
    }
}

#[cfg(test)]
mod tests {
    use contour_trace::TraceError;

    use super::*;

    const ASCENDING: [f64; 5] = [100.0, 150.0, 200.0, 250.0, 300.0];

    #[test]
    fn exact_normalized_copy_scores_zero() {
        let result = Scorer::default()
            .score(&ASCENDING, &[0.0, 0.25, 0.5, 0.75, 1.0])
            .unwrap();
        assert_eq!(result.distance.value(), 0.0);
        assert_eq!(result.normalized_score, 0.0);
        assert!(result.is_match());
    }

    #[test]
    fn inverted_contour_does_not_match() {
        let result = Scorer::default()
            .score(&ASCENDING, &[300.0, 250.0, 200.0, 150.0, 100.0])
            .unwrap();
        assert!(result.distance.value() > 100.0);
        assert!(result.normalized_score > 0.1);
        assert!(!result.is_match());
    }

    #[test]
    fn normalized_reverse_does_not_match() {
        // [0,.25,.5,.75,1] against its reverse: best path costs 3.0, score ~0.6
        let result = Scorer::default()
            .score(&ASCENDING, &[1.0, 0.75, 0.5, 0.25, 0.0])
            .unwrap();
        assert!(!result.is_match());
        assert!(result.normalized_score > 0.5);
    }

    #[test]
    fn score_uses_reference_length_plus_epsilon() {
        // Diagonal alignment costs 0.1 per point; 0.2 / (2 + 1e-4)
        let result = Scorer::default().score(&[0.0, 1.0], &[0.1, 0.9]).unwrap();
        assert!((result.distance.value() - 0.2).abs() < 1e-12);
        assert!((result.normalized_score - 0.2 / 2.0001).abs() < 1e-12);
        assert!(result.is_match());
    }

    #[test]
    fn threshold_is_strict() {
        let first = Scorer::default().score(&[0.0, 1.0], &[0.1, 0.9]).unwrap();
        let at_threshold =
            Scorer::new(ScoreConfig::new().with_threshold(first.normalized_score)).unwrap();
        let again = at_threshold.score(&[0.0, 1.0], &[0.1, 0.9]).unwrap();
        assert_eq!(again.normalized_score, first.normalized_score);
        assert_eq!(again.verdict, Verdict::NoMatch);
    }

    #[test]
    fn rejects_empty_candidate() {
        let result = Scorer::default().score(&ASCENDING, &[]);
        assert!(matches!(
            result,
            Err(ScoreError::InvalidSequence {
                role: SequenceRole::Candidate,
                source: DtwError::EmptyContour
            })
        ));
    }

    #[test]
    fn rejects_empty_reference() {
        let result = Scorer::default().score(&[], &[0.5]);
        assert!(matches!(
            result,
            Err(ScoreError::InvalidSequence {
                role: SequenceRole::Reference,
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_finite_candidate() {
        let result = Scorer::default().score(&ASCENDING, &[0.0, f64::NAN]);
        assert!(matches!(
            result,
            Err(ScoreError::InvalidSequence {
                source: DtwError::NonFiniteValue { index: 1 },
                ..
            })
        ));
    }

    #[test]
    fn evaluate_empty_trace() {
        let result = Scorer::default().evaluate(&ASCENDING, &[], 400.0);
        assert!(matches!(result, Err(ScoreError::Trace(TraceError::EmptyInput))));
    }

    #[test]
    fn evaluate_resamples_to_reference_length() {
        let catalog = PatternCatalog::standard();
        let rising = catalog.get("rising").unwrap().pitches();
        // Screen y falling from 390 to 10 is an upward stroke.
        let raw: Vec<f64> = (0..110).map(|i| 390.0 - f64::from(i) * (380.0 / 109.0)).collect();

        let eval = Scorer::default().evaluate(rising, &raw, 400.0).unwrap();
        assert_eq!(eval.candidate.len(), 11);
        assert!(eval.result.is_match(), "score {}", eval.result.normalized_score);
        assert!(eval.result.normalized_score < 0.05);
    }

    #[test]
    fn evaluate_downward_stroke_against_rising() {
        let catalog = PatternCatalog::standard();
        let rising = catalog.get("rising").unwrap().pitches();
        let raw: Vec<f64> = (0..110).map(|i| 10.0 + f64::from(i) * (380.0 / 109.0)).collect();

        let eval = Scorer::default().evaluate(rising, &raw, 400.0).unwrap();
        assert!(!eval.result.is_match());
        assert!(eval.result.normalized_score > 0.4);
    }

    #[test]
    fn classify_recognizes_shapes() {
        let catalog = PatternCatalog::standard();
        let scorer = Scorer::default();

        let peak: Vec<f64> = (0..11).map(|i| 1.0 - (f64::from(i) - 5.0).abs() / 5.0).collect();
        assert_eq!(scorer.classify(&catalog, &peak).unwrap().pattern, "peak");

        let falling: Vec<f64> = (0..11).map(|i| 1.0 - f64::from(i) / 10.0).collect();
        assert_eq!(scorer.classify(&catalog, &falling).unwrap().pattern, "falling");
    }

    #[test]
    fn display_formats_score_and_verdict() {
        let result = Scorer::default().score(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert_eq!(result.to_string(), "DTW score: 0.000 - good match");
    }

    #[test]
    fn rejects_invalid_config() {
        let result = Scorer::new(ScoreConfig::new().with_threshold(-1.0));
        assert!(matches!(result, Err(ScoreError::InvalidThreshold { .. })));
    }
}
