//! Query results and diagnostics
//!
//! Result rows returned by the recommendation query, plus the numeric
//! breakdowns used to inspect an index: score summaries, per-block
//! contributions and tag frequencies.

use crate::fusion::{FeatureBlock, FeatureLayout};
use serde::Serialize;

/// One recommended neighbor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub tags: Vec<String>,
}

/// One neighbor with its raw similarity score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTitle {
    pub title: String,
    pub score: f64,
}

/// Summary over a list of neighbor scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityStats {
    pub count: usize,
    pub mean: f64,
    pub best: f64,
    pub worst: f64,
}

impl SimilarityStats {
    /// `None` for an empty list
    pub fn compute(scores: &[ScoredTitle]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }

        let mut best = f64::NEG_INFINITY;
        let mut worst = f64::INFINITY;
        let mut sum = 0.0;
        for s in scores {
            best = best.max(s.score);
            worst = worst.min(s.score);
            sum += s.score;
        }

        Some(Self {
            count: scores.len(),
            mean: sum / scores.len() as f64,
            best,
            worst,
        })
    }
}

/// Share of the cosine score contributed by one feature block
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    pub block: FeatureBlock,
    pub score: f64,
}

/// Breakdown of sim(reference, other) by feature block.
///
/// Contributions are the block-restricted dot products divided by the full
/// norms, so they add up to `score` (before clamping).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub reference: String,
    pub other: String,
    pub score: f64,
    pub contributions: Vec<Contribution>,
}

impl Explanation {
    pub(crate) fn compute(
        reference: String,
        other: String,
        a: &[f64],
        b: &[f64],
        layout: &FeatureLayout,
    ) -> Self {
        let norm_a = reelsim_core::simd::norm_simd(a);
        let norm_b = reelsim_core::simd::norm_simd(b);
        let denom = norm_a * norm_b;

        let contributions: Vec<Contribution> = FeatureBlock::ALL
            .iter()
            .map(|&block| {
                let range = layout.range(block);
                let score = if denom == 0.0 {
                    0.0
                } else {
                    reelsim_core::simd::dot_product_simd(&a[range.clone()], &b[range]) / denom
                };
                Contribution { block, score }
            })
            .collect();

        let score: f64 = contributions.iter().map(|c| c.score).sum();
        Self {
            reference,
            other,
            score,
            contributions,
        }
    }

    pub fn contribution(&self, block: FeatureBlock) -> f64 {
        self.contributions
            .iter()
            .find(|c| c.block == block)
            .map_or(0.0, |c| c.score)
    }
}

/// How many catalog items carry a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}
