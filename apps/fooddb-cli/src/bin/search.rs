use clap::Parser;
use std::path::PathBuf;
use std::process;

use fooddb_cli::{describe, init_tracing, load_settings, open_engine};
use fooddb_core::error::Error;
use fooddb_search::save_record;

const SHOWN_PER_CHANNEL: usize = 3;

/// Search the food catalog with a free-form product query.
#[derive(Parser)]
#[command(name = "fooddb-search", version, about)]
struct Cli {
    /// Product query, e.g. "Nutella 400g"
    query: String,

    /// Where to write the JSON record (default: search_results_<query>_<time>.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Extra TOML config merged over config.toml
    #[arg(short, long, env = "FOODDB_CONFIG")]
    config: Option<PathBuf>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.query.trim().is_empty() {
        return Err(Error::EmptyQuery.into());
    }
    let settings = load_settings(cli.config.as_deref())?;
    let engine = open_engine(&settings)?;
    let record = engine.search(&cli.query)?;

    println!("🔍 fooddb-search\n==============");
    println!("Input:     {}", record.input_string);
    println!("Formatted: {}", record.formatted_string);
    for (label, section) in [("Direct", &record.direct_search), ("Fuzzy", &record.rapidfuzz_search)] {
        println!("\n{} search: {} results", label, section.count());
        for (i, result) in section.results().iter().take(SHOWN_PER_CHANNEL).enumerate() {
            println!("  {}. {}", i + 1, describe(result));
        }
    }
    match &record.best_match {
        Some(best) => println!(
            "\nMatch: {:?} (best {:.2} vs threshold {:.2}, id={})",
            record.match_status, best.score, best.threshold, best.product.entry.id
        ),
        None => println!("\nMatch: {:?}", record.match_status),
    }

    let path = save_record(&record, cli.output.as_deref())?;
    println!("📁 Results saved to: {}", path.display());
    Ok(())
}
