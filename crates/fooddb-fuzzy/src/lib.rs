//! fooddb-fuzzy
//!
//! Approximate string similarity (ratio, partial ratio, token-sort ratio) and
//! the in-process reranker that scores catalog candidates with it.

pub mod similarity;
pub mod rerank;

pub use rerank::{retrieve_fuzzy, FuzzyReranker};
