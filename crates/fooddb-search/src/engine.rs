use std::sync::Arc;

use fooddb_core::config::{CandidateSource, Settings};
use fooddb_core::error::{Error, Result};
use fooddb_core::normalize::normalize;
use fooddb_core::traits::{CatalogStore, RankedRetriever};
use fooddb_core::types::{Channel, SearchRecord};
use fooddb_fuzzy::FuzzyReranker;

use crate::assemble::{assemble, ChannelOutcome};
use crate::enrich::enrich;
use crate::retriever::{DirectRetriever, FuzzyRetriever};

/// Runs a query through both channels and assembles the record.
pub struct SearchEngine {
    direct: DirectRetriever,
    fuzzy: FuzzyRetriever,
    candidates: CandidateSource,
    score_threshold: f64,
}

impl SearchEngine {
    /// Both channels read from the same store.
    pub fn new(store: Arc<dyn CatalogStore>, settings: &Settings) -> Self {
        let direct = DirectRetriever::new(Arc::clone(&store), settings.direct.limit);
        let fuzzy = FuzzyRetriever::new(store, FuzzyReranker::new(settings.fuzzy.scoring), settings.fuzzy.limit);
        Self::with_channels(direct, fuzzy, settings)
    }

    pub fn with_channels(direct: DirectRetriever, fuzzy: FuzzyRetriever, settings: &Settings) -> Self {
        Self {
            direct,
            fuzzy,
            candidates: settings.fuzzy.candidates,
            score_threshold: settings.matching.score_threshold,
        }
    }

    pub fn search(&self, raw: &str) -> Result<SearchRecord> {
        let query = normalize(raw)?;
        let formatted = query.formatted();
        tracing::debug!(input = raw, formatted, "running search");

        let (direct, fuzzy) = match self.candidates {
            CandidateSource::Catalog => {
                rayon::join(|| self.direct.retrieve_direct(formatted), || run(&self.fuzzy, formatted))
            }
            CandidateSource::Direct => self.rerank_direct_hits(formatted),
        };
        let record = assemble(&query, direct, fuzzy, self.score_threshold)?;
        tracing::info!(
            direct = record.direct_search.count(),
            fuzzy = record.rapidfuzz_search.count(),
            status = ?record.match_status,
            "search complete"
        );
        Ok(record)
    }

    /// The fuzzy channel scores only what the direct channel found, so it
    /// cannot run without it.
    fn rerank_direct_hits(&self, formatted: &str) -> (ChannelOutcome, ChannelOutcome) {
        match self.direct.retrieve(formatted) {
            Ok(hits) => {
                let candidates = hits.iter().map(|h| h.entry.clone()).collect();
                let fuzzy = self.fuzzy.retrieve_fuzzy(formatted, candidates);
                (Ok(enrich(hits)), Ok(fuzzy))
            }
            Err(e) => {
                let fuzzy = Error::retrieval(Channel::Fuzzy, "no direct candidates to rerank");
                (Err(e), Err(fuzzy))
            }
        }
    }
}

fn run(retriever: &dyn RankedRetriever, formatted: &str) -> ChannelOutcome {
    let outcome = retriever.retrieve(formatted).map(enrich);
    if let Err(e) = &outcome {
        tracing::debug!(channel = %retriever.channel(), error = %e, "retrieval failed");
    }
    outcome
}
