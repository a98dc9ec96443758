//! Query orchestration: runs the direct and fuzzy channels, enriches their
//! hits with display names and assembles the search record.

pub mod assemble;
pub mod engine;
pub mod enrich;
pub mod output;
pub mod retriever;

pub use assemble::{assemble, summarize};
pub use engine::SearchEngine;
pub use output::{default_output_path, save_record};
pub use retriever::{DirectRetriever, FuzzyRetriever};
