// Natural-language query parsing for the smart search
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::dictionary::{self, PREDEFINED_PROMPTS};
use super::translate::{longest_match, translate_query};

const AMOUNT: &str = r"(\d{1,3}(?:[.,]\d{3})+|\d+(?:[.,]\d{1,2})?)";
const CURRENCY: &str = r"(?:€|eur(?:os?)?\b)";

static MAX_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:\b(?:under|below|less than|max(?:imum)?|up to|onder|tot|beneden)\b|<)\s*{CURRENCY}?\s*{AMOUNT}(?:\s*{CURRENCY})?"
    ))
    .unwrap()
});
static MIN_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:\b(?:over|above|more than|from|min(?:imum)?|vanaf|boven)\b|>)\s*{CURRENCY}?\s*{AMOUNT}(?:\s*{CURRENCY})?"
    ))
    .unwrap()
});
static THOUSANDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(?:[.,]\d{3})+$").unwrap());

const SUGGESTION_STYLES: &[&str] = &["mid century", "vintage", "industrial", "scandinavian", "design"];
const SUGGESTION_ITEMS: &[&str] = &["chair", "table", "lamp", "couch", "cabinet"];

/// Structured reading of a free-text furniture query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedQuery {
    pub item_type: Option<String>,
    pub style: Option<String>,
    pub material: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub city: String,
    /// Words left once prices and the city are taken out.
    #[serde(skip)]
    pub keywords: Vec<String>,
}

enum Hit {
    City(&'static str),
    Item(&'static str),
    Style(&'static str),
    Material(&'static str),
}

fn classify(key: &str) -> Option<Hit> {
    if let Some((name, _)) = dictionary::city(key) {
        return Some(Hit::City(name));
    }
    if let Some((canonical, _)) = dictionary::item(key) {
        return Some(Hit::Item(canonical));
    }
    if let Some((canonical, _)) = dictionary::style(key) {
        return Some(Hit::Style(canonical));
    }
    dictionary::material(key).map(|(canonical, _)| Hit::Material(canonical))
}

fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = if THOUSANDS.is_match(raw) {
        raw.replace(['.', ','], "")
    } else {
        raw.replace(',', ".")
    };
    cleaned.parse().ok()
}

/// Pulls the first price bound matching `re` out of `text`.
fn take_price(re: &Regex, text: &str) -> (Option<f64>, String) {
    let Some(caps) = re.captures(text) else {
        return (None, text.to_string());
    };
    let amount = caps.get(1).and_then(|m| parse_amount(m.as_str()));
    (amount, re.replace(text, " ").into_owned())
}

pub fn parse_query(text: &str, default_city: &str) -> ParsedQuery {
    let lower = text.to_lowercase();
    let (max_price, rest) = take_price(&MAX_PRICE, &lower);
    let (min_price, rest) = take_price(&MIN_PRICE, &rest);

    let normalized = dictionary::normalize(&rest);
    let words: Vec<&str> = normalized.split(' ').filter(|w| !w.is_empty()).collect();

    let mut parsed = ParsedQuery {
        item_type: None,
        style: None,
        material: None,
        min_price,
        max_price,
        city: default_city.to_string(),
        keywords: Vec::new(),
    };
    let mut city_found = false;

    let mut i = 0;
    while i < words.len() {
        let Some((len, hit)) = longest_match(&words[i..], classify) else {
            parsed.keywords.push(words[i].to_string());
            i += 1;
            continue;
        };
        match hit {
            Hit::City(name) => {
                if !city_found {
                    parsed.city = name.to_string();
                    city_found = true;
                }
                i += len;
                continue;
            }
            Hit::Item(canonical) => {
                if parsed.item_type.is_none() {
                    parsed.item_type = Some(canonical.to_string());
                }
            }
            Hit::Style(canonical) => {
                if parsed.style.is_none() {
                    parsed.style = Some(canonical.to_string());
                }
            }
            Hit::Material(canonical) => {
                if parsed.material.is_none() {
                    parsed.material = Some(canonical.to_string());
                }
            }
        }
        parsed
            .keywords
            .extend(words[i..i + len].iter().map(|w| w.to_string()));
        i += len;
    }

    parsed
}

/// Dutch search terms for a parsed query.
pub fn search_terms(parsed: &ParsedQuery, raw: &str) -> String {
    if let Some(nl) = dictionary::phrase(&dictionary::normalize(raw)) {
        return nl.to_string();
    }
    if let (Some(style), Some(item)) = (&parsed.style, &parsed.item_type) {
        if let Some(nl) = dictionary::phrase(&format!("{style} {item}")) {
            return nl.to_string();
        }
    }

    if let Some(item) = &parsed.item_type {
        let mut parts: Vec<&str> = Vec::new();
        if let Some((_, nl)) = parsed.style.as_deref().and_then(dictionary::style) {
            parts.push(nl);
        }
        if let Some((_, nl)) = parsed.material.as_deref().and_then(dictionary::material) {
            if !parts.contains(&nl) {
                parts.push(nl);
            }
        }
        if let Some((_, nl)) = dictionary::item(item) {
            parts.push(nl);
        }
        return parts.join(" ");
    }

    translate_query(&parsed.keywords.join(" "))
}

/// Follow-up prompts for generic queries of at most two words.
pub fn suggestions(parsed: &ParsedQuery, raw: &str) -> Option<Vec<String>> {
    let word_count = dictionary::normalize(raw)
        .split(' ')
        .filter(|w| !w.is_empty())
        .count();
    if word_count > 2 {
        return None;
    }

    let list = match (&parsed.item_type, &parsed.style) {
        (Some(item), style) => SUGGESTION_STYLES
            .iter()
            .filter(|s| Some(**s) != style.as_deref())
            .map(|s| format!("{s} {item}"))
            .collect(),
        (None, Some(style)) => SUGGESTION_ITEMS
            .iter()
            .map(|i| format!("{style} {i}"))
            .collect(),
        (None, None) => PREDEFINED_PROMPTS.iter().map(|p| p.to_string()).collect(),
    };
    Some(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(text: &str) -> ParsedQuery {
        parse_query(text, "Amsterdam")
    }

    #[test]
    fn style_only_query_keeps_default_city() {
        let p = parse("mid century living room");
        assert_eq!(p.style.as_deref(), Some("mid century"));
        assert_eq!(p.item_type, None);
        assert_eq!(p.city, "Amsterdam");
    }

    #[test]
    fn full_query_with_price_and_city() {
        let p = parse("vintage chair under €100 in Amsterdam");
        assert_eq!(p.item_type.as_deref(), Some("chair"));
        assert_eq!(p.style.as_deref(), Some("vintage"));
        assert_eq!(p.max_price, Some(100.0));
        assert_eq!(p.min_price, None);
        assert_eq!(p.city, "Amsterdam");
    }

    #[rstest]
    #[case("industrial table Rotterdam", Some("table"), Some("industrial"), "Rotterdam")]
    #[case("scandinavian lamp", Some("lamp"), Some("scandinavian"), "Amsterdam")]
    #[case("cool retro couch", Some("couch"), Some("vintage"), "Amsterdam")]
    #[case("chair", Some("chair"), None, "Amsterdam")]
    #[case("leren bank in den haag", Some("couch"), None, "Den Haag")]
    fn parsed_fields(
        #[case] input: &str,
        #[case] item: Option<&str>,
        #[case] style: Option<&str>,
        #[case] city: &str,
    ) {
        let p = parse(input);
        assert_eq!(p.item_type.as_deref(), item);
        assert_eq!(p.style.as_deref(), style);
        assert_eq!(p.city, city);
    }

    #[rstest]
    #[case("table below 1.250 euro", None, Some(1250.0))]
    #[case("lamp max 49,95", None, Some(49.95))]
    #[case("sofa from €200 to be picked up", Some(200.0), None)]
    #[case("desk over 50 under 300", Some(50.0), Some(300.0))]
    #[case("stoel tot 75", None, Some(75.0))]
    fn price_bounds(#[case] input: &str, #[case] min: Option<f64>, #[case] max: Option<f64>) {
        let p = parse(input);
        assert_eq!(p.min_price, min);
        assert_eq!(p.max_price, max);
    }

    #[test]
    fn material_is_recognized() {
        let p = parse("oak dining table");
        assert_eq!(p.item_type.as_deref(), Some("dining table"));
        assert_eq!(p.material.as_deref(), Some("oak"));
    }

    #[rstest]
    #[case("mid century chair", "teak stoel")]
    #[case("vintage chair under €100 in Amsterdam", "vintage stoel")]
    #[case("industrial table Rotterdam", "industrieel tafel")]
    #[case("cool retro couch", "vintage bank")]
    #[case("design lamp", "lamp design")]
    #[case("oak dining table", "eiken eettafel")]
    #[case("mid century living room", "teak woonkamer")]
    #[case("industrial style", "industrieel metaal")]
    fn generated_search_terms(#[case] input: &str, #[case] expected: &str) {
        let p = parse(input);
        assert_eq!(search_terms(&p, input), expected);
    }

    #[test]
    fn city_never_leaks_into_search_terms() {
        let p = parse("teak in utrecht");
        assert_eq!(search_terms(&p, "teak in utrecht"), "teak");
    }

    #[test]
    fn suggestions_for_bare_item() {
        let p = parse("chair");
        let s = suggestions(&p, "chair").unwrap();
        assert!(s.contains(&"mid century chair".to_string()));
        assert!(s.contains(&"vintage chair".to_string()));
    }

    #[test]
    fn suggestions_skip_the_chosen_style() {
        let p = parse("vintage chair");
        let s = suggestions(&p, "vintage chair").unwrap();
        assert!(!s.contains(&"vintage chair".to_string()));
        assert_eq!(s.len(), SUGGESTION_STYLES.len() - 1);
    }

    #[test]
    fn suggestions_for_bare_style() {
        let p = parse("industrial");
        let s = suggestions(&p, "industrial").unwrap();
        assert_eq!(s[0], "industrial chair");
    }

    #[test]
    fn no_suggestions_for_specific_queries() {
        let q = "industrial table Rotterdam";
        assert!(suggestions(&parse(q), q).is_none());
    }
}
