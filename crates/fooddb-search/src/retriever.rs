use std::sync::Arc;

use fooddb_core::error::{Error, Result};
use fooddb_core::traits::{CatalogStore, RankedRetriever};
use fooddb_core::types::{sort_hits, CatalogEntry, Channel, RankedHit, Score, ScoredResult, SEARCH_STRING_FIELD};
use fooddb_fuzzy::FuzzyReranker;

use crate::enrich::enrich;

/// Exact token search against the store's `search_string` index.
pub struct DirectRetriever {
    store: Arc<dyn CatalogStore>,
    limit: usize,
}

impl DirectRetriever {
    pub fn new(store: Arc<dyn CatalogStore>, limit: usize) -> Self {
        Self { store, limit }
    }

    /// Ranked, enriched direct results. No match is an empty list; a store
    /// failure is a [`Error::Retrieval`].
    pub fn retrieve_direct(&self, formatted_query: &str) -> Result<Vec<ScoredResult>> {
        self.retrieve(formatted_query).map(enrich)
    }
}

impl RankedRetriever for DirectRetriever {
    fn channel(&self) -> Channel {
        Channel::Direct
    }

    fn retrieve(&self, formatted_query: &str) -> Result<Vec<RankedHit>> {
        let docs = self
            .store
            .query_text(SEARCH_STRING_FIELD, formatted_query, self.limit)
            .map_err(|e| Error::retrieval(Channel::Direct, format!("{e:#}")))?;
        let mut hits: Vec<RankedHit> = docs
            .into_iter()
            .map(|(entry, score)| RankedHit { entry, score: Score::Relevance(f64::from(score)) })
            .collect();
        sort_hits(&mut hits);
        tracing::debug!(hits = hits.len(), "direct retrieval complete");
        Ok(hits)
    }
}

/// Similarity ranking over every document the store can enumerate.
pub struct FuzzyRetriever {
    store: Arc<dyn CatalogStore>,
    reranker: FuzzyReranker,
    limit: usize,
}

impl FuzzyRetriever {
    pub fn new(store: Arc<dyn CatalogStore>, reranker: FuzzyReranker, limit: usize) -> Self {
        Self { store, reranker, limit }
    }

    /// Ranks an explicit candidate set, e.g. the direct channel's hits.
    pub fn rerank(&self, formatted_query: &str, candidates: Vec<CatalogEntry>) -> Vec<RankedHit> {
        let mut hits = self.reranker.rerank(formatted_query, candidates);
        hits.truncate(self.limit);
        hits
    }

    pub fn retrieve_fuzzy(&self, formatted_query: &str, candidates: Vec<CatalogEntry>) -> Vec<ScoredResult> {
        enrich(self.rerank(formatted_query, candidates))
    }
}

impl RankedRetriever for FuzzyRetriever {
    fn channel(&self) -> Channel {
        Channel::Fuzzy
    }

    fn retrieve(&self, formatted_query: &str) -> Result<Vec<RankedHit>> {
        let candidates = self
            .store
            .enumerate()
            .map_err(|e| Error::retrieval(Channel::Fuzzy, format!("{e:#}")))?;
        Ok(self.rerank(formatted_query, candidates))
    }
}
