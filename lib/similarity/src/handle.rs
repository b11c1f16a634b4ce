//! Swappable index handle
//!
//! Queries take a snapshot of the current index and run without the lock.
//! A rebuild happens entirely off-lock; only the final pointer swap takes the
//! write lock, so in-flight queries finish against the index they started on.

use crate::config::IndexConfig;
use crate::explain::{Recommendation, ScoredTitle};
use crate::recommend::RecommendationIndex;
use parking_lot::RwLock;
use reelsim_core::{RawItem, Result};
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone)]
pub struct IndexHandle {
    current: Arc<RwLock<Arc<RecommendationIndex>>>,
}

impl IndexHandle {
    pub fn new(index: RecommendationIndex) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(index))),
        }
    }

    pub fn build(items: Vec<RawItem>, config: &IndexConfig) -> Result<Self> {
        RecommendationIndex::build(items, config).map(Self::new)
    }

    /// The index queries currently run against
    pub fn snapshot(&self) -> Arc<RecommendationIndex> {
        self.current.read().clone()
    }

    /// Build a fresh index and swap it in. On error the current index stays
    /// in place.
    pub fn rebuild(&self, items: Vec<RawItem>, config: &IndexConfig) -> Result<Arc<RecommendationIndex>> {
        let fresh = RecommendationIndex::build(items, config)?;
        let previous = self.swap(fresh);
        info!(
            previous = previous.len(),
            current = self.snapshot().len(),
            "swapped recommendation index"
        );
        Ok(previous)
    }

    /// Install `index`, returning the one it replaces
    pub fn swap(&self, index: RecommendationIndex) -> Arc<RecommendationIndex> {
        std::mem::replace(&mut *self.current.write(), Arc::new(index))
    }

    pub fn recommend(&self, title: &str, top_n: usize) -> Result<Vec<Recommendation>> {
        self.snapshot().recommend(title, top_n)
    }

    pub fn similarity_scores(&self, title: &str, top_n: usize) -> Result<Vec<ScoredTitle>> {
        self.snapshot().similarity_scores(title, top_n)
    }
}

/// Normalize, encode, fuse and index a catalog
pub fn build_index(items: Vec<RawItem>, config: &IndexConfig) -> Result<IndexHandle> {
    IndexHandle::build(items, config)
}

pub fn recommend(handle: &IndexHandle, title: &str, top_n: usize) -> Result<Vec<Recommendation>> {
    handle.recommend(title, top_n)
}

pub fn similarity_scores(handle: &IndexHandle, title: &str, top_n: usize) -> Result<Vec<ScoredTitle>> {
    handle.similarity_scores(title, top_n)
}
