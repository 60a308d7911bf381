// Query module: English -> Dutch translation and smart query parsing.

mod dictionary;
pub mod smart;
mod translate;

pub use dictionary::{PREDEFINED_PROMPTS, city_postcode};
pub use smart::{ParsedQuery, parse_query, search_terms, suggestions};
pub use translate::translate_query;

/// Dutch style terms to cross with item types in a style collection.
pub fn style_terms(style: &str) -> Vec<String> {
    let key = dictionary::normalize(style);
    match dictionary::style(&key).and_then(|(canonical, _)| dictionary::style_collection_terms(canonical)) {
        Some(terms) => terms.iter().map(|t| t.to_string()).collect(),
        None => vec![translate_query(style)],
    }
}

/// Canonical English name of a style, if it is a known one.
pub fn canonical_style(style: &str) -> Option<&'static str> {
    dictionary::style(&dictionary::normalize(style)).map(|(canonical, _)| canonical)
}

/// Dutch term for a furniture type, falling back to plain translation.
pub fn item_term(item: &str) -> String {
    match dictionary::item(&dictionary::normalize(item)) {
        Some((_, nl)) => nl.to_string(),
        None => translate_query(item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_terms_for_known_and_unknown_styles() {
        assert_eq!(style_terms("Mid-Century"), vec!["teak", "mid century"]);
        assert_eq!(style_terms("retro"), vec!["vintage", "retro"]);
        assert_eq!(style_terms("japandi"), vec!["japandi"]);
    }

    #[test]
    fn item_terms() {
        assert_eq!(item_term("chair"), "stoel");
        assert_eq!(item_term("Coffee Table"), "salontafel");
        assert_eq!(item_term("plant stand"), "plant stand");
    }

    #[test]
    fn canonical_style_names() {
        assert_eq!(canonical_style("Scandi"), Some("scandinavian"));
        assert_eq!(canonical_style("japandi"), None);
    }
}
