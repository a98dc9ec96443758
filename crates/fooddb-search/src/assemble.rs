use chrono::Utc;

use fooddb_core::error::{Error, Result};
use fooddb_core::types::{
    BestMatch, Channel, ChannelResults, MatchConfidence, MatchStatus, NormalizedQuery, ScoredResult, SearchRecord,
};

/// What one channel produced for a search.
pub type ChannelOutcome = Result<Vec<ScoredResult>>;

/// Builds the search record from both channel outcomes.
///
/// A failed channel becomes an empty section and is logged. Only when both
/// channels fail is the search itself an error.
pub fn assemble(
    query: &NormalizedQuery,
    direct: ChannelOutcome,
    fuzzy: ChannelOutcome,
    score_threshold: f64,
) -> Result<SearchRecord> {
    let (direct, fuzzy) = match (direct, fuzzy) {
        (Err(direct), Err(fuzzy)) => {
            return Err(Error::SearchFailed { direct: failure_reason(direct), fuzzy: failure_reason(fuzzy) })
        }
        (direct, fuzzy) => (degrade(Channel::Direct, direct), degrade(Channel::Fuzzy, fuzzy)),
    };
    let direct_search = ChannelResults::new(direct);
    let rapidfuzz_search = ChannelResults::new(fuzzy);
    let (match_status, match_confidence, best_match) = summarize(&rapidfuzz_search, score_threshold);

    Ok(SearchRecord {
        timestamp: Utc::now(),
        input_string: query.original().to_string(),
        formatted_string: query.formatted().to_string(),
        direct_search,
        rapidfuzz_search,
        match_status,
        match_confidence,
        best_match,
    })
}

/// Grades the top fuzzy result against `threshold` (inclusive).
pub fn summarize(fuzzy: &ChannelResults, threshold: f64) -> (MatchStatus, MatchConfidence, Option<BestMatch>) {
    let Some(top) = fuzzy.top() else {
        return (MatchStatus::NoMatch, MatchConfidence::None, None);
    };
    let score = top.score.value();
    let (status, confidence) = if score >= threshold {
        (MatchStatus::Successful, MatchConfidence::High)
    } else {
        (MatchStatus::LowConfidence, MatchConfidence::Low)
    };
    (status, confidence, Some(BestMatch { score, threshold, product: top.clone() }))
}

fn degrade(channel: Channel, outcome: ChannelOutcome) -> Vec<ScoredResult> {
    outcome.unwrap_or_else(|e| {
        tracing::warn!(%channel, error = %e, "channel failed; reporting empty results");
        Vec::new()
    })
}

fn failure_reason(err: Error) -> String {
    match err {
        Error::Retrieval { reason, .. } => reason,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fooddb_core::normalize::normalize;
    use fooddb_core::types::{CatalogEntry, Score};

    fn result(id: &str, score: f64) -> ScoredResult {
        ScoredResult { entry: CatalogEntry::new(id), score: Score::Similarity(score), given_name: String::new() }
    }

    #[test]
    fn threshold_is_inclusive() {
        let at = ChannelResults::new(vec![result("1", 50.0)]);
        let (status, confidence, best) = summarize(&at, 50.0);
        assert_eq!(status, MatchStatus::Successful);
        assert_eq!(confidence, MatchConfidence::High);
        assert_eq!(best.map(|b| b.product.entry.id), Some("1".to_string()));

        let below = ChannelResults::new(vec![result("1", 49.9)]);
        let (status, confidence, best) = summarize(&below, 50.0);
        assert_eq!(status, MatchStatus::LowConfidence);
        assert_eq!(confidence, MatchConfidence::Low);
        assert_eq!(best.map(|b| b.threshold), Some(50.0));
    }

    #[test]
    fn no_fuzzy_results_is_no_match() {
        let (status, confidence, best) = summarize(&ChannelResults::default(), 50.0);
        assert_eq!(status, MatchStatus::NoMatch);
        assert_eq!(confidence, MatchConfidence::None);
        assert!(best.is_none());
    }

    #[test]
    fn one_failed_channel_is_empty() {
        let query = normalize("Milk").unwrap();
        let record = assemble(
            &query,
            Err(Error::retrieval(Channel::Direct, "index offline")),
            Ok(vec![result("1", 80.0)]),
            50.0,
        )
        .unwrap();
        assert_eq!(record.input_string, "Milk");
        assert_eq!(record.formatted_string, "milk");
        assert_eq!(record.direct_search.count(), 0);
        assert_eq!(record.rapidfuzz_search.count(), 1);
        assert_eq!(record.match_status, MatchStatus::Successful);
    }

    #[test]
    fn both_failed_channels_fail_the_search() {
        let query = normalize("Milk").unwrap();
        let err = assemble(
            &query,
            Err(Error::retrieval(Channel::Direct, "index offline")),
            Err(Error::retrieval(Channel::Fuzzy, "scan aborted")),
            50.0,
        )
        .unwrap_err();
        match err {
            Error::SearchFailed { direct, fuzzy } => {
                assert_eq!(direct, "index offline");
                assert_eq!(fuzzy, "scan aborted");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
