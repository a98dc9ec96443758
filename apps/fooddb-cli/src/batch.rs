//! Batch search summary: one query per line in, CSV out.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

use fooddb_core::given_name::unique_product_names;
use fooddb_core::types::{Channel, ScoredResult, SearchRecord};

pub const HEADER: [&str; 7] = ["Number", "Input string", "Given Name", "Score", "ID", "Categories", "Product Names"];

/// Non-empty lines of `path`, trimmed. Lines starting with `#` are comments.
pub fn read_queries(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// The two rows (`N.Direct`, `N.Fuzzy`) for one query. A failed search gets
/// rows with no hit.
pub fn summary_rows(number: usize, input: &str, record: Option<&SearchRecord>) -> [Vec<String>; 2] {
    let top = |channel: Channel| {
        record.and_then(|r| match channel {
            Channel::Direct => r.direct_search.top(),
            Channel::Fuzzy => r.rapidfuzz_search.top(),
        })
    };
    [
        row(number, Channel::Direct, input, top(Channel::Direct)),
        row(number, Channel::Fuzzy, input, top(Channel::Fuzzy)),
    ]
}

fn row(number: usize, channel: Channel, input: &str, hit: Option<&ScoredResult>) -> Vec<String> {
    let label = match channel {
        Channel::Direct => format!("{number}.Direct"),
        Channel::Fuzzy => format!("{number}.Fuzzy"),
    };
    let Some(hit) = hit else {
        return vec![label, input.to_string(), String::new(), "0".into(), String::new(), String::new(), String::new()];
    };
    vec![
        label,
        input.to_string(),
        hit.given_name.clone(),
        format!("{:.2}", hit.score.value()),
        hit.entry.id.clone(),
        hit.entry.categories.join(", "),
        unique_product_names(&hit.entry).iter().map(|n| n.trim()).collect::<Vec<_>>().join("; "),
    ]
}

pub fn write_csv<W: Write>(mut out: W, rows: &[Vec<String>]) -> Result<()> {
    writeln!(out, "{}", HEADER.iter().map(|h| quote(h)).collect::<Vec<_>>().join(","))?;
    for row in rows {
        writeln!(out, "{}", row.iter().map(|f| quote(f)).collect::<Vec<_>>().join(","))?;
    }
    out.flush()?;
    Ok(())
}

/// RFC 4180 quoting: only fields with a separator, quote or newline are wrapped.
fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
