//! In-memory catalog backend for tests and small fixtures.
//!
//! Text queries score a document by how many of its whitespace tokens match a
//! query token, which is enough to exercise ranking and tie-breaking without a
//! real index.

use anyhow::bail;
use std::collections::HashSet;

use crate::traits::CatalogStore;
use crate::types::{CatalogEntry, SEARCH_STRING_FIELD};

#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    entries: Vec<CatalogEntry>,
}

impl MemoryCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }
}

impl CatalogStore for MemoryCatalog {
    fn query_text(&self, field: &str, term: &str, limit: usize) -> anyhow::Result<Vec<(CatalogEntry, f32)>> {
        if field != SEARCH_STRING_FIELD {
            bail!("field '{}' is not indexed", field);
        }
        let terms: HashSet<String> = term.split_whitespace().map(str::to_lowercase).collect();
        let mut hits: Vec<(CatalogEntry, f32)> = self
            .entries
            .iter()
            .filter_map(|e| {
                let text = e.search_string.as_deref()?;
                let matched = text.split_whitespace().filter(|t| terms.contains(&t.to_lowercase())).count();
                (matched > 0).then(|| (e.clone(), matched as f32))
            })
            .collect();
        hits.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));
        hits.truncate(limit);
        Ok(hits)
    }

    fn enumerate(&self) -> anyhow::Result<Vec<CatalogEntry>> {
        Ok(self.entries.clone())
    }
}
