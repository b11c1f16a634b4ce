//! # reelsim Similarity
//!
//! Content-based feature fusion and similarity ranking for item catalogs.
//!
//! Every catalog item is turned into one fixed-length vector built from its
//! tags, synopsis, keywords and popularity; the whole catalog is then
//! compared pairwise with cosine similarity and queried by title.
//!
//! ## Features
//!
//! - **Categorical Encoder**: tag sets to binary membership vectors
//! - **Text Encoder**: TF-IDF over synopsis and keyword text with a capped vocabulary
//! - **Feature Fusion**: fixed-order concatenation with a recorded layout
//! - **Similarity Index**: dense pairwise cosine, rows computed in parallel
//! - **Recommendation Query**: top-K neighbors by title, plus diagnostics
//!
//! ## Example
//!
//! ```rust
//! use reelsim_core::RawItem;
//! use reelsim_similarity::{build_index, recommend, IndexConfig};
//!
//! let catalog = vec![
//!     RawItem::new("A").with_tags(["Action"]).with_synopsis("hero saves the city").with_popularity(10.0),
//!     RawItem::new("B").with_tags(["Action"]).with_synopsis("hero defends the city").with_popularity(9.0),
//!     RawItem::new("C").with_tags(["Romance"]).with_synopsis("two people fall in love").with_popularity(5.0),
//! ];
//!
//! let handle = build_index(catalog, &IndexConfig::default()).unwrap();
//! let recs = recommend(&handle, "A", 2).unwrap();
//! assert_eq!(recs[0].title, "B");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  RawItem    │────>│ Categorical │────>│   Feature   │
//! │ (normalize) │──┐  │   Encoder   │     │   Fusion    │
//! └─────────────┘  │  └─────────────┘     └─────────────┘
//!                  │  ┌─────────────┐            │
//!                  └─>│ Text Encoder│────────────┘
//!                     │   (x2)      │            │
//!                     └─────────────┘     ┌─────────────┐
//!                                         │ Similarity  │
//!                                         │   Index     │
//!                                         └─────────────┘
//!                                                │
//!                                         ┌─────────────┐
//!                                         │  Recommend  │
//!                                         │  / Explain  │
//!                                         └─────────────┘
//! ```

pub mod categorical;
pub mod config;
pub mod explain;
pub mod fusion;
pub mod handle;
pub mod index;
pub mod recommend;
pub mod report;
pub mod stopwords;
pub mod tfidf;

// Re-export main types for convenience
pub use categorical::CategoricalEncoder;
pub use config::{
    IndexConfig,
    StopWordsConfig,
    StopWordsPreset,
    DEFAULT_MAX_KEYWORD_TERMS,
    DEFAULT_MAX_SYNOPSIS_TERMS,
};
pub use explain::{Contribution, Explanation, Recommendation, ScoredTitle, SimilarityStats, TagCount};
pub use fusion::{FeatureBlock, FeatureColumn, FeatureFusion, FeatureLayout};
pub use handle::{build_index, recommend, similarity_scores, IndexHandle, DEFAULT_TOP_N};
pub use index::SimilarityIndex;
pub use recommend::RecommendationIndex;
pub use report::{BuildReport, ExcludedItem};
pub use stopwords::{StopWords, ENGLISH_STOP_WORDS};
pub use tfidf::{tokenize, TextEncoder};
