use rayon::prelude::*;

use fooddb_core::config::ScoringMode;
use fooddb_core::given_name::unique_product_names;
use fooddb_core::types::{sort_hits, CatalogEntry, RankedHit, Score};

use crate::similarity::field_score;

const NAME_WEIGHT: f64 = 3.0;
const BRAND_WEIGHT: f64 = 2.0;
const CATEGORY_WEIGHT: f64 = 1.5;
const LABEL_WEIGHT: f64 = 1.0;
const QUANTITY_WEIGHT: f64 = 0.5;
/// Extra weight per position for later (more specific) categories.
const CATEGORY_SPECIFICITY_STEP: f64 = 0.1;

/// Scores candidates against a formatted query and ranks them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyReranker {
    mode: ScoringMode,
}

impl FuzzyReranker {
    pub fn new(mode: ScoringMode) -> Self {
        Self { mode }
    }

    /// Similarity of one candidate, or `None` when the candidate lacks the
    /// text this mode scores against. An empty query scores zero for every
    /// candidate.
    pub fn score(&self, query: &str, entry: &CatalogEntry) -> Option<f64> {
        if query.is_empty() {
            return Some(0.0);
        }
        match self.mode {
            ScoringMode::SearchString => {
                let text = entry.search_string.as_deref().filter(|s| !s.trim().is_empty())?;
                Some(field_score(query, text))
            }
            ScoringMode::WeightedFields => Some(weighted_score(query, entry)),
        }
    }

    /// Scores every candidate in parallel and returns them ranked by score
    /// descending, ties by id ascending. Candidates that cannot be scored are
    /// dropped.
    pub fn rerank(&self, formatted_query: &str, candidates: Vec<CatalogEntry>) -> Vec<RankedHit> {
        let total = candidates.len();
        let mut hits: Vec<RankedHit> = candidates
            .into_par_iter()
            .filter_map(|entry| match self.score(formatted_query, &entry) {
                Some(score) => Some(RankedHit { entry, score: Score::Similarity(score) }),
                None => {
                    tracing::warn!(id = %entry.id, "skipping candidate without searchable text");
                    None
                }
            })
            .collect();
        sort_hits(&mut hits);
        tracing::debug!(total, scored = hits.len(), "fuzzy rerank complete");
        hits
    }
}

/// Ranks `candidates` against `formatted_query` using search-string scoring.
pub fn retrieve_fuzzy(formatted_query: &str, candidates: Vec<CatalogEntry>) -> Vec<RankedHit> {
    FuzzyReranker::default().rerank(formatted_query, candidates)
}

/// Weighted sum of per-field similarities. Ranges from 0 to 800.
fn weighted_score(query: &str, entry: &CatalogEntry) -> f64 {
    let names = unique_product_names(entry)
        .into_iter()
        .map(|name| field_score(query, name))
        .fold(0.0, f64::max);
    let brands = entry.brands.as_deref().map_or(0.0, |b| field_score(query, b));
    let labels = entry
        .labels
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| field_score(query, l))
        .fold(0.0, f64::max);
    let quantity = entry.quantity.as_deref().map_or(0.0, |q| field_score(query, q));

    names * NAME_WEIGHT
        + brands * BRAND_WEIGHT
        + category_score(query, entry) * CATEGORY_WEIGHT
        + labels * LABEL_WEIGHT
        + quantity * QUANTITY_WEIGHT
}

/// Best category or category-tag similarity, capped at 100. Later categories
/// get a specificity bonus; tags lose their `xx:` language prefix and dashes.
fn category_score(query: &str, entry: &CatalogEntry) -> f64 {
    let categories = entry
        .categories
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .enumerate()
        .map(|(i, c)| field_score(query, c) * (1.0 + i as f64 * CATEGORY_SPECIFICITY_STEP));
    let tags = entry
        .categories_tags
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| field_score(query, &clean_tag(t)));
    categories.chain(tags).fold(0.0, f64::max).min(100.0)
}

fn clean_tag(tag: &str) -> String {
    let bytes = tag.as_bytes();
    let has_lang_prefix = bytes.len() >= 3 && bytes[0].is_ascii_lowercase() && bytes[1].is_ascii_lowercase() && bytes[2] == b':';
    let tag = if has_lang_prefix { &tag[3..] } else { tag };
    tag.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fooddb_core::types::LocalizedText;

    fn doc(id: &str, search: &str) -> CatalogEntry {
        CatalogEntry { search_string: Some(search.into()), ..CatalogEntry::new(id) }
    }

    #[test]
    fn ranks_closest_text_first() {
        let hits = retrieve_fuzzy(
            "hazelnut spread",
            vec![doc("1", "orange juice 1 l"), doc("2", "nutella hazelnut spread 400 g"), doc("3", "peanut butter")],
        );
        assert_eq!(hits[0].entry.id, "2");
        for pair in hits.windows(2) {
            assert!(pair[0].score.value() >= pair[1].score.value());
        }
    }

    #[test]
    fn empty_query_scores_zero_in_id_order() {
        let hits = retrieve_fuzzy("", vec![doc("c", "x"), doc("a", "y"), CatalogEntry::new("b")]);
        let ids: Vec<&str> = hits.iter().map(|h| h.entry.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(hits.iter().all(|h| h.score == Score::Similarity(0.0)));
    }

    #[test]
    fn candidates_without_search_string_are_skipped() {
        let hits = retrieve_fuzzy("milk", vec![doc("1", "milk"), CatalogEntry::new("2"), doc("3", "   ")]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entry.id, "1");
    }

    #[test]
    fn equal_scores_tie_break_by_id() {
        let hits = retrieve_fuzzy("milk", vec![doc("b", "milk"), doc("a", "milk"), doc("c", "milk")]);
        let ids: Vec<&str> = hits.iter().map(|h| h.entry.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn weighted_mode_prefers_name_over_category_match() {
        let by_name = CatalogEntry {
            product_name: vec![LocalizedText::new("main", "Nutella")],
            categories: vec!["Spreads".into()],
            ..CatalogEntry::new("name")
        };
        let by_category = CatalogEntry {
            product_name: vec![LocalizedText::new("main", "Hazelnut Cream")],
            categories: vec!["Nutella".into()],
            ..CatalogEntry::new("category")
        };
        let reranker = FuzzyReranker::new(ScoringMode::WeightedFields);
        let hits = reranker.rerank("nutella", vec![by_category, by_name]);
        assert_eq!(hits[0].entry.id, "name");
        assert!(hits[0].score.value() >= 300.0);
    }

    #[test]
    fn weighted_mode_scores_entries_without_search_string() {
        let entry = CatalogEntry { brands: Some("Ferrero".into()), ..CatalogEntry::new("1") };
        let score = FuzzyReranker::new(ScoringMode::WeightedFields).score("ferrero", &entry);
        assert_eq!(score, Some(200.0));
    }

    #[test]
    fn category_tags_are_cleaned() {
        assert_eq!(clean_tag("en:hazelnut-spreads"), "hazelnut spreads");
        assert_eq!(clean_tag("hazelnut-spreads"), "hazelnut spreads");
        let entry = CatalogEntry { categories_tags: vec!["en:hazelnut-spreads".into()], ..CatalogEntry::new("1") };
        assert_eq!(category_score("hazelnut spreads", &entry), 100.0);
    }

    #[test]
    fn category_score_is_capped() {
        let entry = CatalogEntry { categories: vec!["Food".into(), "Snacks".into(), "Chocolate".into()], ..CatalogEntry::new("1") };
        assert_eq!(category_score("chocolate", &entry), 100.0);
    }
}
