use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use fooddb_cli::{init_tracing, load_settings};
use fooddb_core::catalog_reader::CatalogReader;
use fooddb_text::CatalogIndexer;

const CHUNK_SIZE: usize = 1000;

/// Load JSONL catalog dumps into the search index.
#[derive(Parser)]
#[command(name = "fooddb-import", version, about)]
struct Cli {
    /// A .jsonl dump or a directory of them
    path: PathBuf,

    /// Index directory (default: store.index_dir from config)
    #[arg(short, long)]
    index: Option<PathBuf>,

    /// Wipe the index before importing
    #[arg(long)]
    fresh: bool,

    /// Extra TOML config merged over config.toml
    #[arg(short, long, env = "FOODDB_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    let index_dir = cli.index.unwrap_or_else(|| settings.store.index_path());

    println!("fooddb catalog import\n=====================");
    println!("Source: {}", cli.path.display());
    println!("Index:  {}", index_dir.display());

    let batch = CatalogReader::new().read_path(&cli.path)?;
    let indexer = if cli.fresh {
        CatalogIndexer::recreate(&index_dir)
    } else {
        CatalogIndexer::open_or_create(&index_dir)
    }
    .with_context(|| format!("opening index at {}", index_dir.display()))?;

    let pb = ProgressBar::new(batch.entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} products ({percent}%) {msg}")?
            .progress_chars("#>-"),
    );
    let mut written = 0usize;
    for chunk in batch.entries.chunks(CHUNK_SIZE) {
        written += indexer.index(chunk)?;
        pb.inc(chunk.len() as u64);
    }
    pb.finish_with_message("done");

    println!("\n✅ Import completed");
    println!("📊 Indexed {} documents ({} lines skipped)", written, batch.skipped);
    println!("📊 Index now holds {} documents", indexer.num_docs()?);
    Ok(())
}
