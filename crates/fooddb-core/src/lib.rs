//! fooddb-core
//!
//! Catalog data model, error taxonomy, store/retriever traits and the pure
//! query-side helpers (normalization and display-name derivation) shared by
//! the text index, the fuzzy reranker and the search engine.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod catalog_reader;
pub mod config;
pub mod error;
pub mod given_name;
pub mod memory;
pub mod normalize;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
