//! Display label ("given name") derivation for catalog entries.

use crate::types::{CatalogEntry, LocalizedText};

/// Categories containing this character are hierarchy paths, not labels.
pub const HIERARCHY_SEPARATOR: char = ':';

/// Language tag of the primary product name.
pub const MAIN_LANG: &str = "main";

/// Derives the human-readable label for `entry`.
///
/// First match wins:
/// 1. the rightmost category that is non-empty after trimming and has no
///    [`HIERARCHY_SEPARATOR`], trimmed
/// 2. the product name tagged [`MAIN_LANG`]
/// 3. the first product name
/// 4. `""`
///
/// Product names with empty text are passed over in 2 and 3.
pub fn compute_given_name(entry: &CatalogEntry) -> String {
    specific_category(&entry.categories)
        .or_else(|| main_product_name(&entry.product_name))
        .or_else(|| first_product_name(&entry.product_name))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Distinct non-empty product name texts, in catalog order.
pub fn unique_product_names(entry: &CatalogEntry) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for name in &entry.product_name {
        let text = name.text.as_str();
        if !text.is_empty() && !names.contains(&text) {
            names.push(text);
        }
    }
    names
}

fn specific_category(categories: &[String]) -> Option<&str> {
    categories
        .iter()
        .rev()
        .map(|c| c.trim())
        .find(|c| !c.is_empty() && !c.contains(HIERARCHY_SEPARATOR))
}

fn main_product_name(names: &[LocalizedText]) -> Option<&str> {
    names
        .iter()
        .find(|n| n.lang == MAIN_LANG && !n.text.is_empty())
        .map(|n| n.text.as_str())
}

fn first_product_name(names: &[LocalizedText]) -> Option<&str> {
    names.iter().find(|n| !n.text.is_empty()).map(|n| n.text.as_str())
}
