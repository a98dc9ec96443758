use anyhow::{bail, Result};
use std::path::Path;
use tantivy::collector::{DocSetCollector, TopDocs};
use tantivy::query::{AllQuery, QueryParser};
use tantivy::schema::{Field, Value};
use tantivy::{Index, IndexReader, TantivyDocument};

use fooddb_core::traits::CatalogStore;
use fooddb_core::types::CatalogEntry;

use crate::tantivy_utils::{register_tokenizer, DOCUMENT_FIELD};

/// Read-only catalog backed by a tantivy index.
pub struct TantivyCatalog {
	index: Index,
	reader: IndexReader,
	document_field: Field,
}

impl TantivyCatalog {
	/// Opens an existing index. A missing directory is an error so that an
	/// unavailable store is reported instead of silently searching nothing.
	pub fn open(index_dir: &Path) -> Result<Self> {
		if !index_dir.exists() { bail!("catalog index not found at {}", index_dir.display()); }
		let index = Index::open_in_dir(index_dir)?;
		Self::from_index(index)
	}

	pub fn from_index(index: Index) -> Result<Self> {
		register_tokenizer(&index);
		let document_field = index.schema().get_field(DOCUMENT_FIELD)?;
		let reader = index.reader()?;
		Ok(Self { index, reader, document_field })
	}

	pub fn num_docs(&self) -> u64 { self.reader.searcher().num_docs() }

	fn decode(&self, doc: &TantivyDocument) -> Option<CatalogEntry> {
		let json = doc.get_first(self.document_field).and_then(|v| v.as_str())?;
		match serde_json::from_str(json) {
			Ok(entry) => Some(entry),
			Err(e) => { tracing::warn!(error = %e, "skipping undecodable catalog document"); None }
		}
	}
}

impl CatalogStore for TantivyCatalog {
	fn query_text(&self, field: &str, term: &str, limit: usize) -> Result<Vec<(CatalogEntry, f32)>> {
		let field = self.index.schema().get_field(field)?;
		if limit == 0 { return Ok(Vec::new()); }
		let searcher = self.reader.searcher();
		let qp = QueryParser::for_index(&self.index, vec![field]);
		let (query, errors) = qp.parse_query_lenient(term);
		if !errors.is_empty() { tracing::debug!(?errors, term, "query parsed leniently"); }
		// TopDocs orders ties by doc address, so keep fetching until every
		// document tied with the last kept score is in hand.
		let mut fetch = limit.saturating_add(1);
		let top_docs = loop {
			let top_docs = searcher.search(&*query, &TopDocs::with_limit(fetch))?;
			let boundary = top_docs.get(limit - 1).map(|(score, _)| *score);
			let last = top_docs.last().map(|(score, _)| *score);
			let ties_open = matches!((boundary, last), (Some(b), Some(l)) if l >= b);
			if top_docs.len() < fetch || !ties_open { break top_docs; }
			fetch = fetch.saturating_mul(2);
		};
		let mut hits = Vec::with_capacity(top_docs.len());
		for (score, addr) in top_docs {
			let doc: TantivyDocument = searcher.doc(addr)?;
			if let Some(entry) = self.decode(&doc) { hits.push((entry, score)); }
		}
		hits.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));
		hits.truncate(limit);
		Ok(hits)
	}

	fn enumerate(&self) -> Result<Vec<CatalogEntry>> {
		let searcher = self.reader.searcher();
		let addresses = searcher.search(&AllQuery, &DocSetCollector)?;
		let mut entries = Vec::with_capacity(addresses.len());
		for addr in addresses {
			let doc: TantivyDocument = searcher.doc(addr)?;
			if let Some(entry) = self.decode(&doc) { entries.push(entry); }
		}
		Ok(entries)
	}
}
