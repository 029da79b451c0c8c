//! DTW distance computation.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::distance::DtwDistance;
use crate::matrix::CostMatrix;
use crate::path::{WarpingPath, WarpingStep};
use crate::series::ContourView;

/// Classic unconstrained Dynamic Time Warping with absolute-difference local cost.
///
/// Holds no state, so one value can be shared freely across threads and
/// concurrent evaluations. Every call allocates its own buffers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dtw;

impl Dtw {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute the DTW distance between two contours.
    ///
    /// Runs in O(n * m) time using a rolling two-row buffer of `m + 1` slots,
    /// where slot 0 is the `+inf` border sentinel. The result is identical to
    /// the final cell of [`cost_matrix`][Dtw::cost_matrix].
    #[must_use]
    #[instrument(level = "trace", skip_all, fields(n = a.len(), m = b.len()))]
    pub fn distance(&self, a: ContourView<'_>, b: ContourView<'_>) -> DtwDistance {
        DtwDistance::new(rolling_distance(a.as_slice(), b.as_slice()))
    }

    /// Compute the full `(n+1) x (m+1)` accumulated cost matrix.
    #[must_use]
    pub fn cost_matrix(&self, a: ContourView<'_>, b: ContourView<'_>) -> CostMatrix {
        CostMatrix::compute(a.as_slice(), b.as_slice())
    }

    /// Compute the DTW distance and an optimal warping path.
    ///
    /// Traces back from `[n][m]` through the cost matrix. On ties the match
    /// predecessor wins, then insertion, then deletion.
    #[must_use]
    #[instrument(level = "trace", skip_all, fields(n = a.len(), m = b.len()))]
    pub fn distance_and_path(
        &self,
        a: ContourView<'_>,
        b: ContourView<'_>,
    ) -> (DtwDistance, WarpingPath) {
        let matrix = self.cost_matrix(a, b);
        let mut steps = Vec::with_capacity(a.len() + b.len());
        let mut i = a.len();
        let mut j = b.len();

        loop {
            steps.push(WarpingStep {
                reference: i - 1,
                candidate: j - 1,
            });
            if i == 1 && j == 1 {
                break;
            }
            // Sentinels on row 0 / column 0 are +inf, so a boundary never wins.
            let matched = matrix.get(i - 1, j - 1);
            let insertion = matrix.get(i - 1, j);
            let deletion = matrix.get(i, j - 1);
            if matched <= insertion && matched <= deletion {
                i -= 1;
                j -= 1;
            } else if insertion <= deletion {
                i -= 1;
            } else {
                j -= 1;
            }
        }

        steps.reverse();
        (matrix.distance(), WarpingPath::new(steps))
    }

    /// Find the candidate closest to `query`.
    ///
    /// Returns the candidate index and its distance, or `None` when
    /// `candidates` is empty. Distances are computed in parallel; ties go to
    /// the lowest index.
    #[must_use]
    #[instrument(skip_all, fields(n_candidates = candidates.len()))]
    pub fn nearest(
        &self,
        query: ContourView<'_>,
        candidates: &[ContourView<'_>],
    ) -> Option<(usize, DtwDistance)> {
        let best = candidates
            .par_iter()
            .enumerate()
            .map(|(idx, candidate)| (idx, self.distance(*candidate, query)))
            .min_by(|x, y| x.1.total_cmp(&y.1).then(x.0.cmp(&y.0)));
        if let Some((idx, dist)) = best {
            debug!(idx, distance = dist.value(), "nearest contour found");
        }
        best
    }
}

fn rolling_distance(a: &[f64], b: &[f64]) -> f64 {
    let m = b.len();
    let mut prev = vec![f64::INFINITY; m + 1];
    let mut curr = vec![f64::INFINITY; m + 1];
    prev[0] = 0.0;

    for &x in a {
        curr[0] = f64::INFINITY;
        for j in 1..=m {
            let cost = (x - b[j - 1]).abs();
            curr[j] = cost + prev[j].min(curr[j - 1]).min(prev[j - 1]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[m]
}
