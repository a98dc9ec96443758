//! Domain types shared by the catalog store, both retrieval channels and the
//! record assembler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

pub type EntryId = String;

/// Name of the precomputed searchable field every store must index.
pub const SEARCH_STRING_FIELD: &str = "search_string";

/// One localized product name. Language tags are not unique within an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default, deserialize_with = "nullable")]
    pub lang: String,
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
}

impl LocalizedText {
    pub fn new(lang: impl Into<String>, text: impl Into<String>) -> Self {
        Self { lang: lang.into(), text: text.into() }
    }
}

/// A product document as stored in the catalog. Read-only for search.
///
/// - `id`: stable catalog key (`_id` or `code` are accepted on input)
/// - `product_name`: localized names, in catalog order
/// - `categories`: category paths, least to most specific; either a JSON array
///   or one comma-separated string on input
/// - `search_string`: concatenated searchable text built at import time
///
/// The remaining fields are passed through untouched into search output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(alias = "_id", alias = "code")]
    pub id: EntryId,
    #[serde(default, deserialize_with = "nullable")]
    pub product_name: Vec<LocalizedText>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brands: Option<String>,
    #[serde(default, deserialize_with = "string_or_list", skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients_text: Option<String>,
    #[serde(default, alias = "nutriscore_grade", skip_serializing_if = "Option::is_none")]
    pub nutrition_grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, deserialize_with = "string_or_list", skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list", skip_serializing_if = "Vec::is_empty")]
    pub categories_tags: Vec<String>,
}

impl CatalogEntry {
    pub fn new(id: impl Into<EntryId>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }
}

/// Raw query plus its canonical form. Only [`crate::normalize::normalize`]
/// builds one, so `formatted` always satisfies the normalizer's invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    original: String,
    formatted: String,
}

impl NormalizedQuery {
    pub(crate) fn new(original: String, formatted: String) -> Self {
        Self { original, formatted }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn formatted(&self) -> &str {
        &self.formatted
    }
}

/// The two retrieval paths a search runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Direct,
    Fuzzy,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Direct => f.write_str("direct"),
            Channel::Fuzzy => f.write_str("fuzzy"),
        }
    }
}

/// Channel-specific score. Serializes as `score` for text relevance and
/// `rapidfuzz_score` for similarity, matching the output file format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Score {
    #[serde(rename = "score")]
    Relevance(f64),
    #[serde(rename = "rapidfuzz_score")]
    Similarity(f64),
}

impl Score {
    pub fn value(self) -> f64 {
        match self {
            Score::Relevance(v) | Score::Similarity(v) => v,
        }
    }
}

/// A candidate and its channel score, before enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedHit {
    pub entry: CatalogEntry,
    pub score: Score,
}

impl RankedHit {
    /// Ranking order shared by both channels: score descending, then `id`
    /// ascending so equal scores always come out in the same order.
    pub fn rank_order(a: &RankedHit, b: &RankedHit) -> Ordering {
        b.score
            .value()
            .total_cmp(&a.score.value())
            .then_with(|| a.entry.id.cmp(&b.entry.id))
    }
}

/// Sorts hits in place using [`RankedHit::rank_order`].
pub fn sort_hits(hits: &mut [RankedHit]) {
    hits.sort_by(RankedHit::rank_order);
}

/// A ranked, enriched result as it appears in a [`SearchRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    #[serde(flatten)]
    pub score: Score,
    pub given_name: String,
}

/// One channel's section of the output. `count` is derived from `results`
/// at construction and cannot drift from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelResults {
    count: usize,
    results: Vec<ScoredResult>,
}

impl ChannelResults {
    pub fn new(results: Vec<ScoredResult>) -> Self {
        Self { count: results.len(), results }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn results(&self) -> &[ScoredResult] {
        &self.results
    }

    pub fn top(&self) -> Option<&ScoredResult> {
        self.results.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Successful,
    LowConfidence,
    NoMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchConfidence {
    High,
    Low,
    None,
}

/// Best fuzzy hit compared against the configured threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMatch {
    pub score: f64,
    pub threshold: f64,
    pub product: ScoredResult,
}

/// The unit of search output, written once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub timestamp: DateTime<Utc>,
    pub input_string: String,
    pub formatted_string: String,
    pub direct_search: ChannelResults,
    pub rapidfuzz_search: ChannelResults,
    pub match_status: MatchStatus,
    pub match_confidence: MatchConfidence,
    pub best_match: Option<BestMatch>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    List(Vec<Option<String>>),
    Text(String),
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StringOrList>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(StringOrList::List(items)) => items.into_iter().flatten().collect(),
        Some(StringOrList::Text(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    })
}
