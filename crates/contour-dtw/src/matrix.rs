//! Full accumulated cost matrix, kept for diagnostics and path traceback.

use std::ops::Index;

use crate::distance::DtwDistance;

/// Accumulated DTW cost table of size `(n+1) x (m+1)`, stored row-major.
///
/// Row 0 and column 0 are unreachable sentinels (`+inf`) except for
/// `[0][0] = 0`, the only valid start. Cell `[i][j]` for `i, j >= 1` holds
/// the minimum cost of aligning the first `i` reference points with the
/// first `j` candidate points.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Fill the table for `a` (rows) against `b` (columns).
    pub(crate) fn compute(a: &[f64], b: &[f64]) -> Self {
        let rows = a.len() + 1;
        let cols = b.len() + 1;
        let mut data = vec![f64::INFINITY; rows * cols];
        data[0] = 0.0;

        for i in 1..rows {
            for j in 1..cols {
                let cost = (a[i - 1] - b[j - 1]).abs();
                let insertion = data[(i - 1) * cols + j];
                let deletion = data[i * cols + j - 1];
                let matched = data[(i - 1) * cols + j - 1];
                data[i * cols + j] = cost + insertion.min(deletion).min(matched);
            }
        }

        Self { rows, cols, data }
    }

    /// Number of rows, including the sentinel row.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, including the sentinel column.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Return the accumulated cost at `[i][j]`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows()` or `j >= cols()`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.rows, "row index {i} out of bounds for {} rows", self.rows);
        assert!(j < self.cols, "column index {j} out of bounds for {} columns", self.cols);
        self.data[i * self.cols + j]
    }

    /// Borrow row `i` as a slice of length `cols()`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows()`.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.rows, "row index {i} out of bounds for {} rows", self.rows);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// The alignment cost in the final cell `[n][m]`.
    #[must_use]
    pub fn distance(&self) -> DtwDistance {
        DtwDistance::new(self.data[self.data.len() - 1])
    }
}

impl Index<(usize, usize)> for CostMatrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        assert!(i < self.rows && j < self.cols, "cell ({i}, {j}) out of bounds");
        &self.data[i * self.cols + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_include_sentinels() {
        let m = CostMatrix::compute(&[1.0, 2.0, 3.0], &[1.0, 2.0]);
        assert_eq!(m.rows(), 4);
        assert_eq!(m.cols(), 3);
    }

    #[test]
    fn border_is_infinite_except_origin() {
        let m = CostMatrix::compute(&[1.0, 2.0], &[3.0, 4.0, 5.0]);
        assert_eq!(m.get(0, 0), 0.0);
        for j in 1..m.cols() {
            assert_eq!(m.get(0, j), f64::INFINITY);
        }
        for i in 1..m.rows() {
            assert_eq!(m.get(i, 0), f64::INFINITY);
        }
    }

    #[test]
    fn hand_computed_cells() {
        // a=[0,1], b=[1,0]
        // D11 = |0-1| + D00 = 1
        // D12 = |0-0| + min(D02, D11, D01) = 1
        // D21 = |1-1| + min(D11, D20, D10) = 1
        // D22 = |1-0| + min(D12, D21, D11) = 2
        let m = CostMatrix::compute(&[0.0, 1.0], &[1.0, 0.0]);
        assert_eq!(m[(1, 1)], 1.0);
        assert_eq!(m[(1, 2)], 1.0);
        assert_eq!(m[(2, 1)], 1.0);
        assert_eq!(m[(2, 2)], 2.0);
        assert_eq!(m.distance().value(), 2.0);
    }

    #[test]
    fn row_slice() {
        let m = CostMatrix::compute(&[0.0], &[1.0, 2.0]);
        assert_eq!(m.row(1), &[f64::INFINITY, 1.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_out_of_bounds_panics() {
        let m = CostMatrix::compute(&[0.0], &[1.0]);
        let _ = m.get(2, 0);
    }
}
