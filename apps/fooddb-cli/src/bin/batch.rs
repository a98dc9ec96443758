use anyhow::Context;
use chrono::Local;
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

use fooddb_cli::batch::{read_queries, summary_rows, write_csv};
use fooddb_cli::{init_tracing, load_settings, open_engine};

/// Run every query in a batch file and summarize the top hits as CSV.
#[derive(Parser)]
#[command(name = "fooddb-batch", version, about)]
struct Cli {
    /// One product query per line; `#` starts a comment line
    #[arg(short, long, default_value = "batch.txt")]
    batch: PathBuf,

    /// CSV output path (default: batch_search_results_<time>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Extra TOML config merged over config.toml
    #[arg(short, long, env = "FOODDB_CONFIG")]
    config: Option<PathBuf>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let queries = read_queries(&cli.batch)?;
    if queries.is_empty() {
        anyhow::bail!("no queries in {}", cli.batch.display());
    }
    let settings = load_settings(cli.config.as_deref())?;
    let engine = open_engine(&settings)?;

    println!("Batch file: {} ({} queries)", cli.batch.display(), queries.len());
    let mut rows = Vec::with_capacity(queries.len() * 2);
    let mut failed = 0usize;
    for (i, query) in queries.iter().enumerate() {
        let number = i + 1;
        println!("Searching {}/{}: '{}'", number, queries.len(), query);
        let record = match engine.search(query) {
            Ok(record) => {
                let top = |r: Option<&fooddb_core::types::ScoredResult>| r.map_or(0.0, |r| r.score.value());
                println!(
                    "  direct top {:.2}, fuzzy top {:.2}",
                    top(record.direct_search.top()),
                    top(record.rapidfuzz_search.top())
                );
                Some(record)
            }
            Err(e) => {
                println!("  Error: {e}");
                failed += 1;
                None
            }
        };
        rows.extend(summary_rows(number, query, record.as_ref()));
    }

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("batch_search_results_{}.csv", Local::now().format("%Y%m%d_%H%M%S"))));
    let file = File::create(&output).with_context(|| format!("creating {}", output.display()))?;
    write_csv(BufWriter::new(file), &rows)?;

    println!("\n✅ Batch search completed");
    println!("📁 Results saved to: {}", output.display());
    println!("🔍 Queries processed: {} ({} failed)", queries.len(), failed);
    if failed == queries.len() {
        anyhow::bail!("every query failed");
    }
    Ok(())
}
