//! # reelsim Core
//!
//! Core library for the reelsim recommendation engine.
//!
//! This crate provides the fundamental data structures:
//!
//! - [`RawItem`] / [`Item`] - catalog records and the attribute normalizer
//! - [`Vector`] - dense double precision vector with SIMD dot products
//! - [`FeatureMatrix`] - stacked fused feature vectors, one row per item
//! - [`SimilarityMatrix`] - square pairwise similarity relation
//!
//! ## Example
//!
//! ```rust
//! use reelsim_core::{RawItem, Vector};
//!
//! let item = RawItem::new("Avatar")
//!     .with_tags(["Action", "Adventure"])
//!     .with_synopsis("A paraplegic Marine is dispatched to the moon Pandora.")
//!     .with_popularity(150.4)
//!     .normalize(0)
//!     .unwrap();
//! assert_eq!(item.tags.len(), 2);
//!
//! let a = Vector::new(vec![1.0, 0.0]);
//! let b = Vector::new(vec![1.0, 1.0]);
//! assert!((a.cosine_similarity(&b) - 0.5f64.sqrt()).abs() < 1e-12);
//! ```

pub mod error;
pub mod item;
pub mod matrix;
pub mod vector;

/// SIMD-optimized vector operations
///
/// Provides hardware-accelerated dot products:
/// - AVX2/FMA on x86_64
/// - SSE2 on x86
/// - NEON on ARM64/Apple Silicon
pub mod simd;

pub use error::{Error, Result};
pub use item::{Item, ItemId, RawItem, TagEntry, TagPayload};
pub use matrix::{FeatureMatrix, SimilarityMatrix};
pub use vector::Vector;
