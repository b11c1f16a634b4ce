//! TF-IDF text encoder with a document-frequency capped vocabulary

use crate::stopwords::StopWords;
use ahash::{AHashMap, AHashSet};
use reelsim_core::Vector;
use tracing::debug;

/// Tokenize text for vocabulary fitting and encoding.
///
/// Lowercases, splits on every character that is neither alphanumeric nor
/// `_`, and keeps tokens of at least two characters.
#[inline]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| s.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// TF-IDF encoder over one text field.
///
/// `fit` keeps the `max_terms` terms with the highest document frequency
/// (ties lexicographic) and orders the kept vocabulary lexicographically.
/// `transform` weights each term by `tf * (ln((1 + N) / (1 + df)) + 1)` and
/// L2-normalizes the result.
#[derive(Debug, Clone)]
pub struct TextEncoder {
    name: &'static str,
    max_terms: usize,
    stop_words: StopWords,
    vocabulary: Vec<String>,
    index: AHashMap<String, usize>,
    document_frequency: Vec<usize>,
    idf: Vec<f64>,
    n_documents: usize,
}

impl TextEncoder {
    pub fn new(name: &'static str, max_terms: usize, stop_words: StopWords) -> Self {
        Self {
            name,
            max_terms,
            stop_words,
            vocabulary: Vec::new(),
            index: AHashMap::new(),
            document_frequency: Vec::new(),
            idf: Vec::new(),
            n_documents: 0,
        }
    }

    /// Tokens of `text` with stop words removed
    pub fn analyze(&self, text: &str) -> Vec<String> {
        tokenize(text)
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }

    /// Learn vocabulary and IDF weights from one document per item.
    /// Refitting replaces any previous state.
    pub fn fit<S: AsRef<str>>(&mut self, corpus: &[S]) {
        let mut doc_freq: AHashMap<String, usize> = AHashMap::new();
        for doc in corpus {
            let tokens = self.analyze(doc.as_ref());
            let unique: AHashSet<String> = tokens.into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let distinct_terms = doc_freq.len();
        let mut ranked: Vec<(String, usize)> = doc_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_terms);
        ranked.sort_by(|a, b| a.0.cmp(&b.0));

        let n = corpus.len() as f64;
        self.n_documents = corpus.len();
        self.idf = ranked
            .iter()
            .map(|(_, df)| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();
        self.document_frequency = ranked.iter().map(|(_, df)| *df).collect();
        self.vocabulary = ranked.into_iter().map(|(term, _)| term).collect();
        self.index = self
            .vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        debug!(
            encoder = self.name,
            documents = self.n_documents,
            distinct_terms,
            vocabulary = self.vocabulary.len(),
            "fitted text vocabulary"
        );
    }

    /// Encode one document; empty or fully out-of-vocabulary text yields the
    /// zero vector
    pub fn transform(&self, text: &str) -> Vector {
        let mut data = vec![0.0; self.vocabulary.len()];
        for token in self.analyze(text) {
            if let Some(&i) = self.index.get(&token) {
                data[i] += 1.0;
            }
        }
        for (weight, idf) in data.iter_mut().zip(&self.idf) {
            *weight *= idf;
        }

        let mut vector = Vector::new(data);
        vector.normalize();
        vector
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.index.get(term).map(|&i| self.idf[i])
    }

    pub fn document_frequency(&self, term: &str) -> Option<usize> {
        self.index.get(term).map(|&i| self.document_frequency[i])
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}
