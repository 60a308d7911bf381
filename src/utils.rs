// Utility functions
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static LISTING_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([am]\d{6,})(?:[-/?#]|$)").unwrap());

/// Trims and collapses runs of whitespace into single spaces.
pub fn clean_text(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Capitalizes the first letter of every alphabetic run.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Lowercases and joins words with hyphens.
pub fn to_kebab_case(text: &str) -> String {
    clean_text(&text.to_lowercase()).replace(' ', "-")
}

/// Resolves `href` against `base`. Absolute links are returned unchanged.
pub fn absolutize(base: &str, href: &str) -> String {
    let href = href.trim();
    if href.is_empty() || href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    match Url::parse(base).and_then(|b| b.join(href)) {
        Ok(u) => u.to_string(),
        Err(_) => href.to_string(),
    }
}

/// Extracts a listing id such as `m2012345678` from a listing URL.
pub fn listing_id_from_url(url: &str) -> Option<String> {
    LISTING_ID
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
