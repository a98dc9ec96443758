use fooddb_core::given_name::compute_given_name;
use fooddb_core::types::{RankedHit, ScoredResult};

/// Attaches a display name to each hit. Order and scores are untouched.
pub fn enrich(hits: Vec<RankedHit>) -> Vec<ScoredResult> {
    hits.into_iter()
        .map(|RankedHit { entry, score }| {
            let given_name = compute_given_name(&entry);
            ScoredResult { entry, score, given_name }
        })
        .collect()
}
