//! Build report

use crate::fusion::FeatureLayout;
use serde::Serialize;

/// A raw record left out of a non-strict build
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcludedItem {
    /// Id of the record, or `#position` when it had none
    pub item: String,
    pub reason: String,
}

/// Outcome of one index build
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
    pub indexed: usize,
    pub excluded: Vec<ExcludedItem>,
    pub duplicate_titles: usize,
    pub duplicate_ids: usize,
    pub dim: usize,
    pub layout: FeatureLayout,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.excluded.is_empty() && self.duplicate_titles == 0 && self.duplicate_ids == 0
    }
}
