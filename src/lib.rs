//! # reelsim
//!
//! Content-based movie recommendations.
//!
//! reelsim turns each catalog entry's genres, synopsis, keywords and
//! popularity into one feature vector, computes cosine similarity across the
//! whole catalog and answers "more like this title" queries.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! reelsim --catalog movies.json --title "Avatar" --top-n 10
//! reelsim --catalog movies.json --title "Avatar" --scores
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use reelsim::prelude::*;
//!
//! let catalog = vec![
//!     RawItem::new("Alien").with_tags(["Horror", "Science Fiction"]).with_popularity(40.0),
//!     RawItem::new("Aliens").with_tags(["Action", "Science Fiction"]).with_popularity(35.0),
//!     RawItem::new("Notting Hill").with_tags(["Romance"]).with_popularity(20.0),
//! ];
//!
//! let handle = build_index(catalog, &IndexConfig::default()).unwrap();
//! let recs = recommend(&handle, "Alien", DEFAULT_TOP_N).unwrap();
//! assert_eq!(recs.len(), 2);
//! ```
//!
//! ## Crate Structure
//!
//! - [`reelsim-core`](https://docs.rs/reelsim-core) - Items, attribute normalization, vectors, matrices, errors
//! - [`reelsim-similarity`](https://docs.rs/reelsim-similarity) - Encoders, feature fusion, similarity index, queries

pub mod catalog;

// Re-export core types
pub use reelsim_core::{
    Error, Result,
    FeatureMatrix, SimilarityMatrix, Vector,
    Item, ItemId, RawItem,
};

// Re-export the engine
pub use reelsim_similarity::{
    build_index, recommend, similarity_scores,
    BuildReport, IndexConfig, IndexHandle, RecommendationIndex,
    Recommendation, ScoredTitle, SimilarityStats, Explanation,
    StopWordsConfig, StopWordsPreset, DEFAULT_TOP_N,
};

pub use catalog::load_catalog;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        build_index, recommend, similarity_scores,
        Error, Result,
        IndexConfig, IndexHandle, RecommendationIndex,
        Item, RawItem,
        Recommendation, ScoredTitle, SimilarityStats,
        DEFAULT_TOP_N,
    };
}

/// SIMD-optimized vector operations
pub mod simd {
    pub use reelsim_core::simd::{dot_product_simd, norm_simd};
}
