//! Categorical encoder: tag sets to binary membership vectors

use ahash::AHashMap;
use reelsim_core::{Item, Vector};
use std::collections::BTreeSet;

/// Multi-label binarizer over the catalog's tag vocabulary.
///
/// The vocabulary is the lexicographically sorted union of all tags seen at
/// fit time, so dimension `k` denotes the same tag for every item.
#[derive(Debug, Clone, Default)]
pub struct CategoricalEncoder {
    vocabulary: Vec<String>,
    index: AHashMap<String, usize>,
}

impl CategoricalEncoder {
    pub fn fit<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let union: BTreeSet<&str> = items
            .into_iter()
            .flat_map(|item| item.tags.iter().map(String::as_str))
            .collect();

        let vocabulary: Vec<String> = union.into_iter().map(str::to_string).collect();
        let index = vocabulary
            .iter()
            .enumerate()
            .map(|(i, tag)| (tag.clone(), i))
            .collect();

        Self { vocabulary, index }
    }

    pub fn transform(&self, item: &Item) -> Vector {
        self.encode_tags(&item.tags)
    }

    /// Out-of-vocabulary tags are dropped
    pub fn encode_tags<I, S>(&self, tags: I) -> Vector
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut data = vec![0.0; self.vocabulary.len()];
        for tag in tags {
            if let Some(&i) = self.index.get(tag.as_ref()) {
                data[i] = 1.0;
            }
        }
        Vector::new(data)
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}
