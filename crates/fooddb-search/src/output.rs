use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use fooddb_core::types::SearchRecord;

const MAX_NAME_CHARS: usize = 30;

/// Writes `record` as pretty-printed JSON, to `path` or to
/// [`default_output_path`] in the working directory. Returns where it went.
pub fn save_record(record: &SearchRecord, path: Option<&Path>) -> Result<PathBuf> {
    let path = path.map_or_else(|| default_output_path(record), Path::to_path_buf);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, record)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    tracing::info!(path = %path.display(), "search results saved");
    Ok(path)
}

/// `search_results_<input>_<YYYYmmdd_HHMMSS>.json`, with the input reduced to
/// a short filesystem-safe slug.
pub fn default_output_path(record: &SearchRecord) -> PathBuf {
    let stamp = record.timestamp.format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("search_results_{}_{}.json", slug(&record.input_string), stamp))
}

fn slug(input: &str) -> String {
    let kept: String = input
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    let mut out = String::new();
    let mut in_gap = false;
    for c in kept.trim().chars() {
        if c == '-' || c.is_whitespace() {
            in_gap = true;
            continue;
        }
        if in_gap {
            out.push('_');
            in_gap = false;
        }
        out.push(c);
    }
    let out: String = out.chars().take(MAX_NAME_CHARS).collect();
    if out.is_empty() {
        "search".to_string()
    } else {
        out
    }
}
