//! fooddb-text
//!
//! Tantivy-backed catalog store: schema and analyzer setup, an upserting
//! indexer for import, and the read-only [`TantivyCatalog`] used by search.

pub mod tantivy_utils;
pub mod index;
pub mod search;

pub use index::CatalogIndexer;
pub use search::TantivyCatalog;
