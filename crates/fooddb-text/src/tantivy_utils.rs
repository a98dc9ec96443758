use tantivy::schema::{Schema, TextFieldIndexing, TextOptions, IndexRecordOption, STRING, STORED};
use tantivy::tokenizer::{TextAnalyzer, SimpleTokenizer, LowerCaser, RemoveLongFilter, StopWordFilter};
use tantivy::Index;

use fooddb_core::types::SEARCH_STRING_FIELD;

pub const ID_FIELD: &str = "id";
pub const DOCUMENT_FIELD: &str = "document";
pub const CATALOG_TOKENIZER: &str = "catalog_text";

/// `id` is an exact-match key, `search_string` is the full-text field and
/// `document` keeps the whole entry as JSON for hydration.
pub fn build_schema() -> Schema {
	let mut schema_builder = Schema::builder();
	schema_builder.add_text_field(ID_FIELD, STRING | STORED);
	let text_field_indexing = TextFieldIndexing::default().set_tokenizer(CATALOG_TOKENIZER).set_index_option(IndexRecordOption::WithFreqsAndPositions);
	let text_options = TextOptions::default().set_indexing_options(text_field_indexing);
	schema_builder.add_text_field(SEARCH_STRING_FIELD, text_options);
	schema_builder.add_text_field(DOCUMENT_FIELD, STORED);
	schema_builder.build()
}

pub fn register_tokenizer(index: &Index) {
	let stop_words = vec![
		"a","an","and","are","as","at","be","by","for","from","in","is","it","of","on","or","the","to","with",
	];
	let tokenizer = TextAnalyzer::builder(SimpleTokenizer::default())
		.filter(RemoveLongFilter::limit(40))
		.filter(LowerCaser)
		.filter(StopWordFilter::remove(stop_words.into_iter().map(|s| s.to_string())))
		.build();
	index.tokenizers().register(CATALOG_TOKENIZER, tokenizer);
}
