//! Dense row-major matrices for the fused feature space and the pairwise
//! similarity relation. Both are immutable once constructed.

use crate::{Error, Result, Vector};

/// Stacked feature vectors, one row per catalog item
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: usize,
    dim: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    /// Stack rows of identical width.
    ///
    /// `dim` is the width recorded at fit time; any row that disagrees is a
    /// fusion bug and fails with [`Error::DimensionMismatch`].
    pub fn from_rows(dim: usize, rows: Vec<Vector>) -> Result<Self> {
        let mut data = Vec::with_capacity(rows.len() * dim);
        for row in &rows {
            if row.dim() != dim {
                return Err(Error::DimensionMismatch {
                    block: "feature row",
                    expected: dim,
                    actual: row.dim(),
                });
            }
            data.extend_from_slice(row.as_slice());
        }

        Ok(Self {
            rows: rows.len(),
            dim,
            data,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Borrow row `i`. Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics; a zero-width matrix still has `rows` rows
        (0..self.rows).map(move |i| self.row(i))
    }
}

/// Square similarity matrix; entry (i, j) is sim(item i, item j)
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Wrap an `n * n` row-major buffer.
    pub fn from_raw(n: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != n * n {
            return Err(Error::DimensionMismatch {
                block: "similarity matrix",
                expected: n * n,
                actual: data.len(),
            });
        }
        Ok(Self { n, data })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Largest absolute elementwise difference against another matrix of the
    /// same size, `f64::INFINITY` when the sizes differ
    pub fn max_abs_diff(&self, other: &SimilarityMatrix) -> f64 {
        if self.n != other.n {
            return f64::INFINITY;
        }
        self.data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_matrix_rows() {
        let m = FeatureMatrix::from_rows(
            2,
            vec![Vector::new(vec![1.0, 2.0]), Vector::new(vec![3.0, 4.0])],
        )
        .unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.dim(), 2);
        assert_eq!(m.row(1), &[3.0, 4.0]);
        assert_eq!(m.iter_rows().count(), 2);
    }

    #[test]
    fn test_feature_matrix_rejects_ragged_rows() {
        let err = FeatureMatrix::from_rows(
            2,
            vec![Vector::new(vec![1.0, 2.0]), Vector::new(vec![3.0])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch { block: "feature row", expected: 2, actual: 1 }
        );
    }

    #[test]
    fn test_zero_width_rows_are_iterable() {
        let m = FeatureMatrix::from_rows(0, vec![Vector::zeros(0), Vector::zeros(0)]).unwrap();
        assert_eq!(m.iter_rows().filter(|r| r.is_empty()).count(), 2);
    }

    #[test]
    fn test_similarity_matrix_access() {
        let m = SimilarityMatrix::from_raw(2, vec![1.0, 0.5, 0.5, 1.0]).unwrap();
        assert_eq!(m.get(0, 1), 0.5);
        assert_eq!(m.row(1), &[0.5, 1.0]);
        assert_eq!(m.max_abs_diff(&m.clone()), 0.0);
        assert!(SimilarityMatrix::from_raw(2, vec![1.0]).is_err());
    }
}
