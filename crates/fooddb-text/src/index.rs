use anyhow::{Context, Result};
use std::path::Path;
use tantivy::directory::MmapDirectory;
use tantivy::schema::Field;
use tantivy::{doc, Index, IndexWriter, Term};

use fooddb_core::catalog_reader::build_search_string;
use fooddb_core::types::{CatalogEntry, SEARCH_STRING_FIELD};

use crate::search::TantivyCatalog;
use crate::tantivy_utils::{build_schema, register_tokenizer, DOCUMENT_FIELD, ID_FIELD};

const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Writes catalog entries into a tantivy index with upsert-by-id semantics.
pub struct CatalogIndexer {
	index: Index,
	id_field: Field,
	search_field: Field,
	document_field: Field,
}

impl CatalogIndexer {
	/// Opens the index at `index_dir`, creating it (and the directory) if needed.
	pub fn open_or_create(index_dir: &Path) -> Result<Self> {
		std::fs::create_dir_all(index_dir)?;
		let dir = MmapDirectory::open(index_dir).with_context(|| format!("opening {}", index_dir.display()))?;
		let index = Index::open_or_create(dir, build_schema())?;
		Self::from_index(index)
	}

	/// Wipes `index_dir` and starts a fresh index.
	pub fn recreate(index_dir: &Path) -> Result<Self> {
		if index_dir.exists() { std::fs::remove_dir_all(index_dir)?; }
		std::fs::create_dir_all(index_dir)?;
		let index = Index::create_in_dir(index_dir, build_schema())?;
		Self::from_index(index)
	}

	pub fn create_in_ram() -> Result<Self> {
		Self::from_index(Index::create_in_ram(build_schema()))
	}

	fn from_index(index: Index) -> Result<Self> {
		register_tokenizer(&index);
		let schema = index.schema();
		let id_field = schema.get_field(ID_FIELD)?;
		let search_field = schema.get_field(SEARCH_STRING_FIELD)?;
		let document_field = schema.get_field(DOCUMENT_FIELD)?;
		Ok(Self { index, id_field, search_field, document_field })
	}

	/// Upserts `entries` and commits. Entries without an id are skipped.
	/// Returns the number of documents written.
	pub fn index(&self, entries: &[CatalogEntry]) -> Result<usize> {
		let mut index_writer: IndexWriter = self.index.writer(WRITER_HEAP_BYTES)?;
		let mut written = 0usize;
		for entry in entries {
			if entry.id.trim().is_empty() {
				tracing::warn!("skipping catalog entry without id");
				continue;
			}
			let search_string = entry
				.search_string
				.clone()
				.filter(|s| !s.trim().is_empty())
				.unwrap_or_else(|| build_search_string(entry));
			let stored = CatalogEntry { search_string: Some(search_string.clone()), ..entry.clone() };
			let json = serde_json::to_string(&stored)?;
			index_writer.delete_term(Term::from_field_text(self.id_field, &entry.id));
			index_writer.add_document(doc!(
				self.id_field => entry.id.clone(),
				self.search_field => search_string,
				self.document_field => json,
			))?;
			written += 1;
		}
		index_writer.commit()?;
		tracing::debug!(written, "catalog batch committed");
		Ok(written)
	}

	pub fn num_docs(&self) -> Result<u64> {
		Ok(self.index.reader()?.searcher().num_docs())
	}

	/// Read-side view over the same index.
	pub fn catalog(&self) -> Result<TantivyCatalog> {
		TantivyCatalog::from_index(self.index.clone())
	}
}
