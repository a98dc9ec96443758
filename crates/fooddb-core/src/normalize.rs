//! Query normalization.
//!
//! Rewrites a raw, often malformed query (`"BorówkaAmeryk500g"`) into the
//! canonical lowercase, space-delimited form used by both retrieval channels
//! (`"borówka ameryk 500 g"`). Letter classes are Unicode-aware so Polish and
//! other accented input splits the same way as ASCII.

use crate::error::{Error, Result};
use crate::types::NormalizedQuery;

/// Normalizes `raw`, rejecting input that is blank after trimming.
pub fn normalize(raw: &str) -> Result<NormalizedQuery> {
    if raw.trim().is_empty() {
        return Err(Error::EmptyQuery);
    }
    Ok(NormalizedQuery::new(raw.to_string(), format_query(raw)))
}

/// Total form of [`normalize`]: blank input yields an empty string.
///
/// Steps, in order: camelCase split, digit/letter split, removal of `,` and
/// `;`, lowercasing, whitespace collapse. The two splits are re-applied where
/// a later step can undo them.
pub fn format_query(raw: &str) -> String {
    let text = split_camel_case(raw);
    let text = split_digit_letter(&text);
    let text: String = text.chars().filter(|c| !matches!(c, ',' | ';')).collect();
    // "a,1" collapses to "a1" above; split again so no digit touches a letter.
    let text = split_digit_letter(&text).to_lowercase();
    // uppercase letters without a lowercase form ("ϒ") survive lowercasing
    let text = split_camel_case(&text);
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn split_camel_case(text: &str) -> String {
    // lower -> Upper: "krówkaŚmietankowa" -> "krówka Śmietankowa"
    let chars: Vec<char> = text.chars().collect();
    let mut split = String::with_capacity(text.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && chars[i - 1].is_lowercase() && c.is_uppercase() {
            split.push(' ');
        }
        split.push(c);
    }

    // UPPER run before Upper+lower: "XMLHttp" -> "XML Http"
    let chars: Vec<char> = split.chars().collect();
    let mut out = String::with_capacity(split.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
        if i > 0 && chars[i - 1].is_uppercase() && c.is_uppercase() && next_is_lower {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

fn split_digit_letter(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if let Some(p) = prev {
            let boundary = (p.is_ascii_digit() && c.is_alphabetic()) || (p.is_alphabetic() && c.is_ascii_digit());
            if boundary {
                out.push(' ');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}
