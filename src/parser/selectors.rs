// Ordered CSS selector fallbacks
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::model::ParserError;

/// Selectors tried in order; the first one that matches wins.
pub struct Cascade {
    name: &'static str,
    entries: Vec<(&'static str, Selector)>,
}

impl Cascade {
    pub fn new(name: &'static str, sources: &[&'static str]) -> Result<Self, ParserError> {
        let entries = sources
            .iter()
            .map(|src| {
                Selector::parse(src)
                    .map(|sel| (*src, sel))
                    .map_err(|e| ParserError::Selector(format!("{src}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { name, entries })
    }

    /// First element inside `scope` matched by the earliest matching selector.
    pub fn first_in<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.entries
            .iter()
            .find_map(|(_, sel)| scope.select(sel).next())
    }

    /// All document matches of the earliest selector that matches anything.
    pub fn select_all<'a>(&self, document: &'a Html) -> Option<(&'static str, Vec<ElementRef<'a>>)> {
        for (src, sel) in &self.entries {
            let found: Vec<ElementRef<'a>> = document.select(sel).collect();
            if !found.is_empty() {
                debug!("{}: {} matches for {}", self.name, found.len(), src);
                return Some((*src, found));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"
        <div class="card"><h2>Second choice</h2><span class="b">b</span></div>
        <div class="card"><h2>Other</h2></div>
    "#;

    #[test]
    fn earliest_matching_selector_wins() {
        let doc = Html::parse_fragment(HTML);
        let cascade = Cascade::new("title", &["h3", "h2"]).unwrap();
        let card = Cascade::new("card", &[".missing", ".card"]).unwrap();
        let (src, cards) = card.select_all(&doc).unwrap();
        assert_eq!(src, ".card");
        assert_eq!(cards.len(), 2);
        let title = cascade.first_in(cards[0]).unwrap();
        assert_eq!(title.text().collect::<String>(), "Second choice");
    }

    #[test]
    fn no_match_is_none() {
        let doc = Html::parse_fragment(HTML);
        let cascade = Cascade::new("x", &[".nope", "article"]).unwrap();
        assert!(cascade.select_all(&doc).is_none());
    }

    #[test]
    fn invalid_selector_is_reported() {
        assert!(matches!(
            Cascade::new("bad", &["div[["]),
            Err(ParserError::Selector(_))
        ));
    }
}
