//! Warping path types for DTW alignment.

/// One aligned pair in a warping path: control point `reference` of the
/// first contour matched with control point `candidate` of the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarpingStep {
    /// Zero-based index into the first contour.
    pub reference: usize,
    /// Zero-based index into the second contour.
    pub candidate: usize,
}

/// Ordered alignment from `(0, 0)` to `(n-1, m-1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WarpingPath(Vec<WarpingStep>);

impl WarpingPath {
    pub(crate) fn new(steps: Vec<WarpingStep>) -> Self {
        Self(steps)
    }

    #[must_use]
    pub fn steps(&self) -> &[WarpingStep] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Count the steps where both contours advanced together.
    #[must_use]
    pub fn diagonal_steps(&self) -> usize {
        self.0
            .windows(2)
            .filter(|w| w[1].reference > w[0].reference && w[1].candidate > w[0].candidate)
            .count()
    }
}

impl<'a> IntoIterator for &'a WarpingPath {
    type Item = &'a WarpingStep;
    type IntoIter = std::slice::Iter<'a, WarpingStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
