//! Recommendation Query
//!
//! [`RecommendationIndex`] owns one complete build: normalized items, fitted
//! encoders, feature matrix and similarity index. It is immutable and shared
//! across threads through `Arc`.

use crate::config::IndexConfig;
use crate::explain::{Explanation, Recommendation, ScoredTitle, TagCount};
use crate::fusion::FeatureFusion;
use crate::index::SimilarityIndex;
use crate::report::{BuildReport, ExcludedItem};
use ahash::{AHashMap, AHashSet};
use ordered_float::OrderedFloat;
use reelsim_core::{Error, FeatureMatrix, Item, RawItem, Result};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct RecommendationIndex {
    items: Vec<Item>,
    fusion: FeatureFusion,
    features: FeatureMatrix,
    similarity: SimilarityIndex,
    report: BuildReport,
    config: IndexConfig,
}

impl RecommendationIndex {
    /// Normalize `raw` and build every stage on the survivors.
    ///
    /// Malformed records are excluded and reported unless `config.strict`,
    /// in which case the first one aborts the build.
    pub fn build(raw: Vec<RawItem>, config: &IndexConfig) -> Result<Self> {
        config.validate()?;

        let mut items = Vec::with_capacity(raw.len());
        let mut excluded = Vec::new();
        for (position, record) in raw.into_iter().enumerate() {
            let label = record.label(position);
            match record.normalize(position) {
                Ok(item) => items.push(item),
                Err(e) if config.strict => return Err(e),
                Err(e) => {
                    warn!(item = %label, error = %e, "excluding malformed item");
                    excluded.push(ExcludedItem {
                        item: label,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Self::assemble(items, excluded, config)
    }

    /// Build from records that are already normalized
    pub fn from_items(items: Vec<Item>, config: &IndexConfig) -> Result<Self> {
        config.validate()?;
        Self::assemble(items, Vec::new(), config)
    }

    fn assemble(items: Vec<Item>, excluded: Vec<ExcludedItem>, config: &IndexConfig) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        let fusion = FeatureFusion::fit(&items, config);
        let features = fusion.fuse_all(&items)?;
        let titles = items.iter().map(|item| item.title.clone()).collect();
        let similarity = SimilarityIndex::build(&features, titles)?;
        let duplicate_ids = count_duplicate_ids(&items, &excluded);

        let report = BuildReport {
            indexed: items.len(),
            excluded,
            duplicate_titles: similarity.duplicate_titles(),
            duplicate_ids,
            dim: fusion.dim(),
            layout: fusion.layout(),
        };

        info!(
            indexed = report.indexed,
            excluded = report.excluded.len(),
            duplicate_titles = report.duplicate_titles,
            duplicate_ids = report.duplicate_ids,
            dim = report.dim,
            "built recommendation index"
        );

        Ok(Self {
            items,
            fusion,
            features,
            similarity,
            report,
            config: config.clone(),
        })
    }

    /// The `top_n` items most similar to `title`, best first.
    ///
    /// The reference row itself is never returned; ties keep catalog order.
    pub fn recommend(&self, title: &str, top_n: usize) -> Result<Vec<Recommendation>> {
        Ok(self
            .ranked(title, top_n)?
            .into_iter()
            .map(|(row, _)| {
                let item = &self.items[row];
                Recommendation {
                    title: item.title.clone(),
                    tags: item.tags.iter().cloned().collect(),
                }
            })
            .collect())
    }

    /// Same ranking as [`recommend`](Self::recommend) with raw scores
    pub fn similarity_scores(&self, title: &str, top_n: usize) -> Result<Vec<ScoredTitle>> {
        Ok(self
            .ranked(title, top_n)?
            .into_iter()
            .map(|(row, score)| ScoredTitle {
                title: self.items[row].title.clone(),
                score,
            })
            .collect())
    }

    fn ranked(&self, title: &str, top_n: usize) -> Result<Vec<(usize, f64)>> {
        if top_n == 0 {
            return Err(Error::InvalidTopN(top_n));
        }
        let reference = self.similarity.row_of(title)?;

        let mut scored: Vec<(usize, f64)> = (0..self.items.len())
            .filter(|&row| row != reference)
            .map(|row| (row, self.similarity.similarity(reference, row)))
            .collect();

        // sort_by_key is stable, so equal scores stay in catalog order
        scored.sort_by_key(|&(_, score)| std::cmp::Reverse(OrderedFloat(score)));
        scored.truncate(top_n);
        Ok(scored)
    }

    /// Per-block breakdown of sim(`reference`, `other`)
    pub fn explain(&self, reference: &str, other: &str) -> Result<Explanation> {
        let a = self.similarity.row_of(reference)?;
        let b = self.similarity.row_of(other)?;
        Ok(Explanation::compute(
            reference.to_string(),
            other.to_string(),
            self.features.row(a),
            self.features.row(b),
            &self.fusion.layout(),
        ))
    }

    /// Tags by descending item count, ties lexicographic; `limit = None`
    /// returns all of them
    pub fn tag_frequencies(&self, limit: Option<usize>) -> Vec<TagCount> {
        let mut counts: AHashMap<&str, usize> = AHashMap::new();
        for item in &self.items {
            for tag in &item.tags {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }

        let mut frequencies: Vec<TagCount> = counts
            .into_iter()
            .map(|(tag, count)| TagCount {
                tag: tag.to_string(),
                count,
            })
            .collect();
        frequencies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
        if let Some(limit) = limit {
            frequencies.truncate(limit);
        }
        frequencies
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, title: &str) -> Result<&Item> {
        self.similarity.row_of(title).map(|row| &self.items[row])
    }

    pub fn fusion(&self) -> &FeatureFusion {
        &self.fusion
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    pub fn similarity(&self) -> &SimilarityIndex {
        &self.similarity
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Ids seen more than once across indexed and excluded records.
///
/// Excluded records without a usable id are labelled `#position`, which
/// never repeats.
fn count_duplicate_ids(items: &[Item], excluded: &[ExcludedItem]) -> usize {
    let mut seen: AHashSet<String> = AHashSet::with_capacity(items.len() + excluded.len());
    let mut duplicates = 0;
    let labels = items
        .iter()
        .map(|item| (item.id.to_string(), Some(item.title.as_str())))
        .chain(excluded.iter().map(|e| (e.item.clone(), None)));
    for (id, title) in labels {
        if !seen.insert(id.clone()) {
            warn!(id = %id, title = ?title, "duplicate item id");
            duplicates += 1;
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fusion::FeatureBlock;
    use serde_json::json;

    fn three_items() -> Vec<RawItem> {
        vec![
            RawItem::new("A")
                .with_tags(["Action", "SciFi"])
                .with_synopsis("space marine fights aliens")
                .with_popularity(10.0),
            RawItem::new("B")
                .with_tags(["Action", "SciFi"])
                .with_synopsis("space soldier fights aliens")
                .with_popularity(8.0),
            RawItem::new("C")
                .with_tags(["Romance"])
                .with_synopsis("a quiet love story")
                .with_popularity(5.0),
        ]
    }

    #[test]
    fn test_recommend_ranks_closest_first() {
        let index = RecommendationIndex::build(three_items(), &IndexConfig::default()).unwrap();
        let recs = index.recommend("A", 2).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].title, "B");
        assert_eq!(recs[0].tags, vec!["Action", "SciFi"]);
        assert_eq!(recs[1].title, "C");

        let scores = index.similarity_scores("A", 2).unwrap();
        assert!(scores[0].score > scores[1].score);
    }

    #[test]
    fn test_query_errors() {
        let index = RecommendationIndex::build(three_items(), &IndexConfig::default()).unwrap();
        assert_eq!(index.recommend("Z", 2), Err(Error::UnknownTitle("Z".to_string())));
        assert_eq!(index.recommend("A", 0), Err(Error::InvalidTopN(0)));
        assert_eq!(index.recommend("A", 50).unwrap().len(), 2);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let raw: Vec<RawItem> = ["Ref", "X", "Y", "Z"]
            .iter()
            .map(|t| RawItem::new(*t).with_tags(["Drama"]).with_popularity(1.0))
            .collect();
        let index = RecommendationIndex::build(raw, &IndexConfig::default()).unwrap();
        let titles: Vec<String> =
            index.recommend("Y", 3).unwrap().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Ref", "X", "Z"]);
    }

    #[test]
    fn test_malformed_items_excluded_or_fatal() {
        let mut raw = three_items();
        raw.push(serde_json::from_value(json!({"id": 99, "title": "Bad", "popularity": -3})).unwrap());

        let index = RecommendationIndex::build(raw.clone(), &IndexConfig::default()).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.report().excluded.len(), 1);
        assert_eq!(index.report().excluded[0].item, "99");

        let strict = IndexConfig::default().strict(true);
        assert!(matches!(
            RecommendationIndex::build(raw, &strict),
            Err(Error::MalformedAttribute { attribute: "popularity", .. })
        ));
    }

    #[test]
    fn test_id_shape_errors_excluded_or_fatal() {
        let mut raw = three_items();
        raw.push(serde_json::from_value(json!({"id": -3, "title": "Neg", "popularity": 3.0})).unwrap());

        let index = RecommendationIndex::build(raw.clone(), &IndexConfig::default()).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.report().excluded[0].item, "#3");
        assert!(index.report().excluded[0].reason.contains("id"));

        let strict = IndexConfig::default().strict(true);
        assert!(matches!(
            RecommendationIndex::build(raw, &strict),
            Err(Error::MalformedAttribute { attribute: "id", ref item, .. }) if item == "#3"
        ));
    }

    #[test]
    fn test_duplicate_ids_counted() {
        let raw = vec![
            RawItem::new("A").with_id(5u64).with_tags(["Drama"]).with_popularity(1.0),
            RawItem::new("B").with_id(5u64).with_tags(["Drama"]).with_popularity(2.0),
            RawItem::new("C").with_id(6u64).with_popularity(3.0),
            RawItem::new("D").with_id(6u64).with_popularity(-1.0),
        ];
        let index = RecommendationIndex::build(raw, &IndexConfig::default()).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.report().duplicate_ids, 2);
        assert!(!index.report().is_clean());
        assert_eq!(index.recommend("B", 1).unwrap()[0].title, "A");
    }

    #[test]
    fn test_titles_match_as_loaded() {
        let mut raw = three_items();
        raw.push(RawItem::new("  Heat ").with_tags(["Crime"]).with_popularity(4.0));
        let index = RecommendationIndex::build(raw, &IndexConfig::default()).unwrap();

        assert_eq!(index.item("  Heat ").unwrap().title, "  Heat ");
        assert_eq!(index.recommend("  Heat ", 1).unwrap().len(), 1);
        assert!(index.recommend("A", 3).unwrap().iter().any(|r| r.title == "  Heat "));
        assert_eq!(index.recommend("Heat", 1), Err(Error::UnknownTitle("Heat".to_string())));
    }

    #[test]
    fn test_empty_catalog() {
        let raw = vec![RawItem::default()];
        assert_eq!(
            RecommendationIndex::build(raw, &IndexConfig::default()).unwrap_err(),
            Error::EmptyCatalog
        );
        assert_eq!(
            RecommendationIndex::from_items(Vec::new(), &IndexConfig::default()).unwrap_err(),
            Error::EmptyCatalog
        );
    }

    #[test]
    fn test_explain_matches_similarity() {
        let index = RecommendationIndex::build(three_items(), &IndexConfig::default()).unwrap();
        let e = index.explain("A", "C").unwrap();
        let direct = index.similarity().similarity(0, 2);
        assert!((e.score - direct).abs() < 1e-12);
        // A and C share no tag and no synopsis term
        assert_eq!(e.contribution(FeatureBlock::Tags), 0.0);
        assert_eq!(e.contribution(FeatureBlock::Synopsis), 0.0);
        assert!((e.contribution(FeatureBlock::Popularity) - direct).abs() < 1e-12);
    }

    #[test]
    fn test_tag_frequencies() {
        let index = RecommendationIndex::build(three_items(), &IndexConfig::default()).unwrap();
        let all = index.tag_frequencies(None);
        assert_eq!(
            all,
            vec![
                TagCount { tag: "Action".into(), count: 2 },
                TagCount { tag: "SciFi".into(), count: 2 },
                TagCount { tag: "Romance".into(), count: 1 },
            ]
        );
        assert_eq!(index.tag_frequencies(Some(1)).len(), 1);
    }
}
