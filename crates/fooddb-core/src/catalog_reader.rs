use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::given_name::unique_product_names;
use crate::normalize::format_query;
use crate::types::CatalogEntry;

/// Entries read from a catalog dump plus the number of lines that could not be
/// decoded.
#[derive(Debug, Default)]
pub struct CatalogBatch {
    pub entries: Vec<CatalogEntry>,
    pub skipped: usize,
}

/// Reads JSON-lines catalog dumps: one product document per line.
#[derive(Default)]
pub struct CatalogReader;

impl CatalogReader {
    pub fn new() -> Self { Self }

    /// Reads a single dump file, or every `.jsonl`/`.ndjson` file under a
    /// directory in path order.
    pub fn read_path(&self, path: &Path) -> Result<CatalogBatch> {
        let files = if path.is_dir() { self.list_dump_files(path) } else { vec![path.to_path_buf()] };
        if files.is_empty() {
            tracing::warn!(dir = %path.display(), "no catalog dump files found");
        }
        let mut batch = CatalogBatch::default();
        for file in &files {
            tracing::info!(file = %file.display(), "reading catalog dump");
            let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
            self.read_lines(reader, &mut batch)?;
        }
        tracing::info!(entries = batch.entries.len(), skipped = batch.skipped, "catalog dump read");
        Ok(batch)
    }

    pub fn read_lines<R: BufRead>(&self, reader: R, batch: &mut CatalogBatch) -> Result<()> {
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() { continue; }
            match serde_json::from_str::<CatalogEntry>(line) {
                Ok(entry) if entry.id.trim().is_empty() => {
                    tracing::warn!(line = line_no + 1, "skipping catalog entry without id");
                    batch.skipped += 1;
                }
                Ok(mut entry) => {
                    if entry.search_string.as_deref().map_or(true, |s| s.trim().is_empty()) {
                        entry.search_string = Some(build_search_string(&entry));
                    }
                    batch.entries.push(entry);
                }
                Err(e) => {
                    tracing::warn!(line = line_no + 1, error = %e, "skipping malformed catalog line");
                    batch.skipped += 1;
                }
            }
        }
        Ok(())
    }

    fn list_dump_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| matches!(p.extension().and_then(|s| s.to_str()), Some("jsonl" | "ndjson")))
            .collect();
        files.sort();
        files
    }
}

/// Builds the searchable text for an entry: product names, brands,
/// categories, quantity and labels, run through the query normalizer so the
/// index sees the same token shapes as incoming queries.
pub fn build_search_string(entry: &CatalogEntry) -> String {
    let mut parts: Vec<&str> = unique_product_names(entry);
    parts.extend(entry.brands.as_deref());
    parts.extend(entry.categories.iter().map(String::as_str));
    parts.extend(entry.quantity.as_deref());
    parts.extend(entry.labels.iter().map(String::as_str));
    format_query(&parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocalizedText;

    #[test]
    fn search_string_is_normalized_concatenation() {
        let entry = CatalogEntry {
            product_name: vec![LocalizedText::new("main", "Nutella"), LocalizedText::new("en", "Nutella")],
            brands: Some("Ferrero".into()),
            categories: vec!["Spreads".into(), "Hazelnut Spreads".into()],
            quantity: Some("400g".into()),
            ..CatalogEntry::new("1")
        };
        assert_eq!(build_search_string(&entry), "nutella ferrero spreads hazelnut spreads 400 g");
    }

    #[test]
    fn read_lines_skips_bad_lines() {
        let input = concat!(
            "{\"code\":\"1\",\"product_name\":[{\"lang\":\"main\",\"text\":\"Milk\"}]}\n",
            "not json\n",
            "\n",
            "{\"code\":\"\"}\n",
            "{\"code\":\"2\",\"search_string\":\"prebuilt text\"}\n",
        );
        let mut batch = CatalogBatch::default();
        CatalogReader::new().read_lines(input.as_bytes(), &mut batch).unwrap();
        assert_eq!(batch.entries.len(), 2);
        assert_eq!(batch.skipped, 2);
        assert_eq!(batch.entries[0].search_string.as_deref(), Some("milk"));
        assert_eq!(batch.entries[1].search_string.as_deref(), Some("prebuilt text"));
    }
}
