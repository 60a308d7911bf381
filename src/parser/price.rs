use regex::Regex;
use std::sync::LazyLock;

use crate::model::PriceType;
use crate::utils::clean_text;

static EURO_AMOUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"€\s*([0-9.,]+)").unwrap());

const NEGOTIABLE_MARKERS: &[&str] = &["bieden", "op aanvraag", "n.o.t.k", "notk"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceInfo {
    pub amount: Option<f64>,
    pub kind: PriceType,
}

impl PriceInfo {
    const UNKNOWN: PriceInfo = PriceInfo {
        amount: None,
        kind: PriceType::Unknown,
    };
}

/// Reads a Dutch price label: `.` groups thousands, `,` starts the cents.
pub fn extract_price(text: &str) -> PriceInfo {
    let cleaned = clean_text(&text.to_lowercase());
    if cleaned.is_empty() {
        return PriceInfo::UNKNOWN;
    }

    if NEGOTIABLE_MARKERS.iter().any(|m| cleaned.contains(m)) {
        return PriceInfo {
            amount: None,
            kind: PriceType::Negotiable,
        };
    }
    if cleaned.contains("gratis") {
        return PriceInfo {
            amount: Some(0.0),
            kind: PriceType::Free,
        };
    }

    if let Some(caps) = EURO_AMOUNT.captures(&cleaned) {
        let digits = caps[1]
            .trim_end_matches(['.', ','])
            .replace('.', "")
            .replace(',', ".");
        return PriceInfo {
            amount: digits.parse::<f64>().ok(),
            kind: PriceType::Fixed,
        };
    }

    PriceInfo::UNKNOWN
}

/// Maps the listing API's `priceType` onto [`PriceType`].
pub fn price_type_from_api(raw: &str) -> PriceType {
    match raw.to_ascii_uppercase().as_str() {
        "FIXED" => PriceType::Fixed,
        "MIN_BID" | "FAST_BID" | "BID" | "NOTK" | "ON_REQUEST" => PriceType::Negotiable,
        "FREE" => PriceType::Free,
        _ => PriceType::Unknown,
    }
}
