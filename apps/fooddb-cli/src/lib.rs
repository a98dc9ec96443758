//! Setup shared by the fooddb binaries: logging, settings and the engine.

pub mod batch;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use fooddb_core::config::{Config, Settings};
use fooddb_core::given_name::unique_product_names;
use fooddb_core::types::ScoredResult;
use fooddb_search::SearchEngine;
use fooddb_text::TantivyCatalog;

/// Logs go to stderr so stdout stays clean for results. `RUST_LOG` overrides
/// the default `info` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tantivy=warn")))
        .with_writer(std::io::stderr)
        .init();
}

/// Layered settings, with `extra` merged on top when given.
pub fn load_settings(extra: Option<&Path>) -> Result<Settings> {
    let mut config = Config::load()?;
    if let Some(path) = extra {
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        config = config.with_file(path);
    }
    Ok(config.settings()?)
}

/// Opens the configured index read-only and wires both channels to it.
pub fn open_engine(settings: &Settings) -> Result<SearchEngine> {
    let index_dir = settings.store.index_path();
    let catalog = TantivyCatalog::open(&index_dir)
        .with_context(|| format!("catalog store unavailable at {}", index_dir.display()))?;
    tracing::info!(index = %index_dir.display(), docs = catalog.num_docs(), "catalog opened");
    Ok(SearchEngine::new(Arc::new(catalog), settings))
}

/// One-line human summary of a result.
pub fn describe(result: &ScoredResult) -> String {
    let names = unique_product_names(&result.entry);
    let names = if names.is_empty() { "N/A".to_string() } else { names.join(", ") };
    format!(
        "{:.2}  {}  id={}  names={}",
        result.score.value(),
        if result.given_name.is_empty() { "-" } else { result.given_name.as_str() },
        result.entry.id,
        names
    )
}
