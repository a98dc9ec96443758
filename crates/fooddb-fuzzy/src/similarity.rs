//! Edit-distance similarity metrics on a 0-100 scale.
//!
//! All metrics are character based (not byte based) and return `0.0` when
//! either side is empty.

/// Normalized Levenshtein similarity of the whole strings.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Best [`ratio`] of the shorter string against every window of the longer
/// string with the same length, so a query that appears inside a longer text
/// scores 100.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() { (a, b) } else { (b, a) };
    let short_len = short.chars().count();
    if short_len == 0 {
        return 0.0;
    }
    // byte offsets of every char boundary, including the end
    let bounds: Vec<usize> = long.char_indices().map(|(i, _)| i).chain(std::iter::once(long.len())).collect();
    let windows = bounds.len() - short_len;
    let mut best = 0.0f64;
    for start in 0..windows {
        let window = &long[bounds[start]..bounds[start + short_len]];
        best = best.max(ratio(short, window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

/// [`ratio`] after sorting whitespace-separated tokens, so word order does not
/// matter.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Case-insensitive field score: the better of [`partial_ratio`] and
/// [`token_sort_ratio`].
pub fn field_score(query: &str, text: &str) -> f64 {
    if query.is_empty() || text.is_empty() {
        return 0.0;
    }
    let query = query.to_lowercase();
    let text = text.to_lowercase();
    partial_ratio(&query, &text).max(token_sort_ratio(&query, &text))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_bounds() {
        assert_eq!(ratio("nutella", "nutella"), 100.0);
        assert_eq!(ratio("", "nutella"), 0.0);
        assert_eq!(ratio("", ""), 0.0);
        assert!(ratio("nutella", "nutela") > 80.0);
        assert!(ratio("abc", "xyz") < 1.0);
    }

    #[test]
    fn partial_ratio_finds_substring() {
        assert_eq!(partial_ratio("nutella", "nutella hazelnut spread 400 g"), 100.0);
        assert_eq!(partial_ratio("nutella hazelnut spread 400 g", "nutella"), 100.0);
        assert!(partial_ratio("hazelnat", "nutella hazelnut spread") > 85.0);
        assert_eq!(partial_ratio("", "abc"), 0.0);
    }

    #[test]
    fn partial_ratio_handles_multibyte_text() {
        assert_eq!(partial_ratio("śmietankowa", "krówka śmietankowa 250 g"), 100.0);
        assert_eq!(partial_ratio("żółć", "żółć"), 100.0);
    }

    #[test]
    fn token_sort_ignores_word_order() {
        assert_eq!(token_sort_ratio("spread hazelnut nutella", "nutella hazelnut spread"), 100.0);
        assert!(ratio("spread hazelnut nutella", "nutella hazelnut spread") < 100.0);
    }

    #[test]
    fn field_score_is_case_insensitive() {
        assert_eq!(field_score("nutella", "NUTELLA Hazelnut Spread"), 100.0);
        assert!(field_score("pizza", "Nutella Hazelnut Spread") < 50.0);
        assert_eq!(field_score("", "Nutella"), 0.0);
    }
}
