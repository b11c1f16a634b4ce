//! Similarity Index
//!
//! Dense pairwise cosine similarity over the fused feature matrix plus the
//! title lookup used by queries.

use ahash::AHashMap;
use rayon::prelude::*;
use reelsim_core::simd::{dot_product_simd, norm_simd};
use reelsim_core::{Error, FeatureMatrix, Result, SimilarityMatrix};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    matrix: SimilarityMatrix,
    titles: Vec<String>,
    title_index: AHashMap<String, usize>,
    duplicate_titles: usize,
}

impl SimilarityIndex {
    /// Compute every pairwise similarity of `features`; `titles[i]` names
    /// row `i`.
    ///
    /// Rows are filled in parallel, each worker writing only its own output
    /// row, so the result equals a sequential pass bit for bit.
    pub fn build(features: &FeatureMatrix, titles: Vec<String>) -> Result<Self> {
        let n = features.rows();
        if titles.len() != n {
            return Err(Error::DimensionMismatch {
                block: "title list",
                expected: n,
                actual: titles.len(),
            });
        }

        let norms: Vec<f64> = features.iter_rows().map(norm_simd).collect();
        let mut data = vec![0.0; n * n];

        if n > 0 {
            data.par_chunks_mut(n).enumerate().for_each(|(i, out)| {
                let row_i = features.row(i);
                for (j, slot) in out.iter_mut().enumerate() {
                    *slot = if i == j {
                        if norms[i] > 0.0 {
                            1.0
                        } else {
                            0.0
                        }
                    } else {
                        cosine(row_i, features.row(j), norms[i], norms[j])
                    };
                }
            });
        }

        let mut title_index = AHashMap::with_capacity(n);
        let mut duplicate_titles = 0;
        for (i, title) in titles.iter().enumerate() {
            if title_index.contains_key(title) {
                duplicate_titles += 1;
                warn!(title = %title, row = i, "duplicate title, first occurrence wins");
            } else {
                title_index.insert(title.clone(), i);
            }
        }

        Ok(Self {
            matrix: SimilarityMatrix::from_raw(n, data)?,
            titles,
            title_index,
            duplicate_titles,
        })
    }

    /// Row of the first item carrying `title`
    pub fn row_of(&self, title: &str) -> Result<usize> {
        self.title_index
            .get(title)
            .copied()
            .ok_or_else(|| Error::UnknownTitle(title.to_string()))
    }

    pub fn title(&self, row: usize) -> &str {
        &self.titles[row]
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    #[inline]
    pub fn similarity(&self, i: usize, j: usize) -> f64 {
        self.matrix.get(i, j)
    }

    pub fn title_index(&self) -> &AHashMap<String, usize> {
        &self.title_index
    }

    pub fn duplicate_titles(&self) -> usize {
        self.duplicate_titles
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }
}

#[inline]
fn cosine(a: &[f64], b: &[f64], norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot_product_simd(a, b) / (norm_a * norm_b)).clamp(-1.0, 1.0)
}
