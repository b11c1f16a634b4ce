//! Feature Fusion
//!
//! Concatenates the per-item sub-vectors into one composite vector, in the
//! fixed column order: tags, synopsis terms, keyword terms, popularity.
//!
//! No per-block rescaling is applied. Tag columns are 0/1, text blocks are
//! unit length and popularity stays in its native range, so on catalogs
//! with large popularity values that column carries most of the norm.
//! Rescale the input explicitly for a different balance.

use crate::categorical::CategoricalEncoder;
use crate::config::IndexConfig;
use crate::tfidf::TextEncoder;
use reelsim_core::{Error, FeatureMatrix, Item, Result, Vector};
use serde::Serialize;
use std::ops::Range;

/// A contiguous group of columns produced by one encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureBlock {
    Tags,
    Synopsis,
    Keywords,
    Popularity,
}

impl FeatureBlock {
    pub const ALL: [FeatureBlock; 4] = [
        FeatureBlock::Tags,
        FeatureBlock::Synopsis,
        FeatureBlock::Keywords,
        FeatureBlock::Popularity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FeatureBlock::Tags => "tags",
            FeatureBlock::Synopsis => "synopsis",
            FeatureBlock::Keywords => "keywords",
            FeatureBlock::Popularity => "popularity",
        }
    }
}

/// Block widths recorded at fit time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureLayout {
    pub tags: usize,
    pub synopsis: usize,
    pub keywords: usize,
}

impl FeatureLayout {
    pub const POPULARITY_WIDTH: usize = 1;

    pub fn width(&self, block: FeatureBlock) -> usize {
        match block {
            FeatureBlock::Tags => self.tags,
            FeatureBlock::Synopsis => self.synopsis,
            FeatureBlock::Keywords => self.keywords,
            FeatureBlock::Popularity => Self::POPULARITY_WIDTH,
        }
    }

    /// Total fused dimension
    pub fn dim(&self) -> usize {
        self.tags + self.synopsis + self.keywords + Self::POPULARITY_WIDTH
    }

    /// Column range occupied by `block`
    pub fn range(&self, block: FeatureBlock) -> Range<usize> {
        let start: usize = FeatureBlock::ALL
            .iter()
            .take_while(|&&b| b != block)
            .map(|&b| self.width(b))
            .sum();
        start..start + self.width(block)
    }
}

/// What a fused dimension denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureColumn<'a> {
    Tag(&'a str),
    SynopsisTerm(&'a str),
    KeywordTerm(&'a str),
    Popularity,
}

/// Fitted encoders plus the layout they produce
#[derive(Debug, Clone)]
pub struct FeatureFusion {
    tags: CategoricalEncoder,
    synopsis: TextEncoder,
    keywords: TextEncoder,
    layout: FeatureLayout,
}

impl FeatureFusion {
    /// Fit every encoder on the catalog
    pub fn fit(items: &[Item], config: &IndexConfig) -> Self {
        let stop_words = config.stop_words.resolve();

        let tags = CategoricalEncoder::fit(items);

        let synopses: Vec<&str> = items.iter().map(|item| item.synopsis.as_str()).collect();
        let mut synopsis = TextEncoder::new("synopsis", config.max_synopsis_terms, stop_words.clone());
        synopsis.fit(&synopses);

        let keyword_docs: Vec<String> = items.iter().map(Item::keyword_text).collect();
        let mut keywords = TextEncoder::new("keywords", config.max_keyword_terms, stop_words);
        keywords.fit(&keyword_docs);

        let layout = FeatureLayout {
            tags: tags.len(),
            synopsis: synopsis.len(),
            keywords: keywords.len(),
        };

        Self {
            tags,
            synopsis,
            keywords,
            layout,
        }
    }

    pub fn layout(&self) -> FeatureLayout {
        self.layout
    }

    pub fn dim(&self) -> usize {
        self.layout.dim()
    }

    pub fn categorical(&self) -> &CategoricalEncoder {
        &self.tags
    }

    pub fn synopsis_encoder(&self) -> &TextEncoder {
        &self.synopsis
    }

    pub fn keyword_encoder(&self) -> &TextEncoder {
        &self.keywords
    }

    /// Encode and concatenate one item's attributes
    pub fn fuse(&self, item: &Item) -> Result<Vector> {
        let tags = self.tags.transform(item);
        let synopsis = self.synopsis.transform(&item.synopsis);
        let keywords = self.keywords.transform(&item.keyword_text());
        self.assemble(&tags, &synopsis, &keywords, item.popularity)
    }

    /// Concatenate already-encoded sub-vectors, checking each against the
    /// fitted layout
    pub fn assemble(
        &self,
        tags: &Vector,
        synopsis: &Vector,
        keywords: &Vector,
        popularity: f64,
    ) -> Result<Vector> {
        for (block, part) in [
            (FeatureBlock::Tags, tags),
            (FeatureBlock::Synopsis, synopsis),
            (FeatureBlock::Keywords, keywords),
        ] {
            let expected = self.layout.width(block);
            if part.dim() != expected {
                return Err(Error::DimensionMismatch {
                    block: block.name(),
                    expected,
                    actual: part.dim(),
                });
            }
        }

        Ok(Vector::concat(&[
            tags.as_slice(),
            synopsis.as_slice(),
            keywords.as_slice(),
            &[popularity],
        ]))
    }

    /// Fuse every item into the catalog feature matrix, rows in item order
    pub fn fuse_all(&self, items: &[Item]) -> Result<FeatureMatrix> {
        let rows = items
            .iter()
            .map(|item| self.fuse(item))
            .collect::<Result<Vec<_>>>()?;
        FeatureMatrix::from_rows(self.dim(), rows)
    }

    /// Name the tag, term or signal behind fused dimension `dim`
    pub fn column(&self, dim: usize) -> Option<FeatureColumn<'_>> {
        for block in FeatureBlock::ALL {
            let range = self.layout.range(block);
            if range.contains(&dim) {
                let offset = dim - range.start;
                return Some(match block {
                    FeatureBlock::Tags => FeatureColumn::Tag(&self.tags.vocabulary()[offset]),
                    FeatureBlock::Synopsis => {
                        FeatureColumn::SynopsisTerm(&self.synopsis.vocabulary()[offset])
                    }
                    FeatureBlock::Keywords => {
                        FeatureColumn::KeywordTerm(&self.keywords.vocabulary()[offset])
                    }
                    FeatureBlock::Popularity => FeatureColumn::Popularity,
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelsim_core::RawItem;

    fn catalog() -> Vec<Item> {
        vec![
            RawItem::new("A")
                .with_tags(["Action"])
                .with_synopsis("hero saves the city")
                .with_keywords(["hero", "city"])
                .with_popularity(10.0),
            RawItem::new("C")
                .with_tags(["Romance"])
                .with_synopsis("two people fall in love")
                .with_keywords(["love"])
                .with_popularity(5.0),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, raw)| raw.normalize(i).unwrap())
        .collect()
    }

    #[test]
    fn test_layout_and_dimension() {
        let items = catalog();
        let fusion = FeatureFusion::fit(&items, &IndexConfig::default());
        let layout = fusion.layout();

        // tags: Action, Romance; synopsis: city, fall, hero, love, people, saves
        assert_eq!(layout, FeatureLayout { tags: 2, synopsis: 6, keywords: 3 });
        assert_eq!(fusion.dim(), 2 + 6 + 3 + 1);
        assert_eq!(layout.range(FeatureBlock::Synopsis), 2..8);
        assert_eq!(layout.range(FeatureBlock::Popularity), 11..12);

        let matrix = fusion.fuse_all(&items).unwrap();
        assert_eq!(matrix.rows(), 2);
        assert!(matrix.iter_rows().all(|row| row.len() == fusion.dim()));
    }

    #[test]
    fn test_column_order() {
        let items = catalog();
        let fusion = FeatureFusion::fit(&items, &IndexConfig::default());
        let v = fusion.fuse(&items[0]).unwrap();

        assert_eq!(v.as_slice()[0], 1.0);
        assert_eq!(v.as_slice()[1], 0.0);
        assert_eq!(*v.as_slice().last().unwrap(), 10.0);

        assert_eq!(fusion.column(0), Some(FeatureColumn::Tag("Action")));
        assert_eq!(fusion.column(2), Some(FeatureColumn::SynopsisTerm("city")));
        assert_eq!(fusion.column(8), Some(FeatureColumn::KeywordTerm("city")));
        assert_eq!(fusion.column(11), Some(FeatureColumn::Popularity));
        assert_eq!(fusion.column(12), None);
    }

    #[test]
    fn test_assemble_rejects_wrong_widths() {
        let items = catalog();
        let fusion = FeatureFusion::fit(&items, &IndexConfig::default());
        let layout = fusion.layout();

        let err = fusion
            .assemble(
                &Vector::zeros(layout.tags),
                &Vector::zeros(layout.synopsis + 1),
                &Vector::zeros(layout.keywords),
                1.0,
            )
            .unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch { block: "synopsis", expected: 6, actual: 7 }
        );
    }

    #[test]
    fn test_unseen_item_still_fuses() {
        let items = catalog();
        let fusion = FeatureFusion::fit(&items, &IndexConfig::default());
        let outsider = RawItem::new("Z")
            .with_tags(["Western"])
            .with_synopsis("cowboys ride")
            .with_popularity(2.0)
            .normalize(0)
            .unwrap();
        let v = fusion.fuse(&outsider).unwrap();
        assert_eq!(v.dim(), fusion.dim());
        assert_eq!(v.norm(), 2.0);
    }
}
