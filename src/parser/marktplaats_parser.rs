// Marktplaats-specific HTML and API parsing
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use super::api::parse_api;
use super::price::extract_price;
use super::selectors::Cascade;
use crate::model::{Listing, Page, ParserError};
use crate::utils::clean_text;

const CONTAINERS: &[&str] = &[
    r#"[data-testid="listing-ad-card"]"#,
    ".mp-listing",
    ".hz-Listing",
    r#"[data-testid*="listing"]"#,
    ".mp-listing-item",
    r#"article[class*="listing"]"#,
];
const TITLES: &[&str] = &[
    "h3",
    ".mp-listing-title",
    r#"[data-testid*="title"]"#,
    "h2",
    ".hz-Listing-title",
];
const PRICES: &[&str] = &[
    r#"[data-testid="ad-price"]"#,
    ".mp-listing-price",
    r#"[data-testid*="price"]"#,
    ".hz-Listing-price",
    ".price",
];
const LOCATIONS: &[&str] = &[
    ".mp-listing-location",
    r#"[data-testid*="location"]"#,
    ".hz-Listing-location",
    ".location",
];
const DESCRIPTIONS: &[&str] = &[
    ".mp-listing-description",
    r#"[data-testid*="description"]"#,
    ".hz-Listing-description",
    ".description",
];
const ID_ATTRS: &[&str] = &["data-item-id", "data-id"];

pub trait Parser {
    fn parse(&self, page: &Page) -> Result<Vec<Listing>, ParserError>;
}

pub struct MarktplaatsParser {
    containers: Cascade,
    title: Cascade,
    price: Cascade,
    location: Cascade,
    description: Cascade,
    link: Selector,
    image: Selector,
}

impl MarktplaatsParser {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            containers: Cascade::new("containers", CONTAINERS)?,
            title: Cascade::new("title", TITLES)?,
            price: Cascade::new("price", PRICES)?,
            location: Cascade::new("location", LOCATIONS)?,
            description: Cascade::new("description", DESCRIPTIONS)?,
            link: parse_selector("a[href]")?,
            image: parse_selector("img[src], img[data-src]")?,
        })
    }

    /// Extracts listing cards from a search result page.
    pub fn parse_html(&self, html: &str) -> Vec<Listing> {
        let document = Html::parse_document(html);

        let Some((selector, cards)) = self.containers.select_all(&document) else {
            debug!("No listing containers matched");
            return Vec::new();
        };
        info!("Found {} listings using selector: {}", cards.len(), selector);

        cards
            .into_iter()
            .filter_map(|card| self.extract_listing(card))
            .collect()
    }

    fn extract_listing(&self, card: ElementRef) -> Option<Listing> {
        let title = self.title.first_in(card).map(text_of).unwrap_or_default();
        if title.is_empty() {
            return None;
        }

        let mut listing = Listing {
            title,
            ..Listing::default()
        };

        if let Some(node) = self.price.first_in(card) {
            let raw = text_of(node);
            let info = extract_price(&raw);
            listing.price = info.amount;
            listing.price_type = info.kind;
            listing.price_text = raw;
        }
        if let Some(node) = self.location.first_in(card) {
            listing.location = text_of(node);
        }
        if let Some(node) = self.description.first_in(card) {
            listing.description = text_of(node);
        }
        if let Some(href) = card
            .select(&self.link)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            listing.url = href.to_string();
        }
        if let Some(img) = card.select(&self.image).next() {
            let el = img.value();
            let src = el.attr("src").filter(|s| !s.is_empty() && !s.starts_with("data:"));
            if let Some(src) = src.or_else(|| el.attr("data-src")) {
                listing.image = src.to_string();
            }
        }
        if let Some(id) = ID_ATTRS.iter().find_map(|a| card.value().attr(a)) {
            listing.id = id.to_string();
        }

        Some(listing)
    }
}

impl Parser for MarktplaatsParser {
    fn parse(&self, page: &Page) -> Result<Vec<Listing>, ParserError> {
        match page {
            Page::Json(body) => parse_api(body),
            Page::Html(body) => Ok(self.parse_html(body)),
        }
    }
}

fn parse_selector(src: &str) -> Result<Selector, ParserError> {
    Selector::parse(src).map_err(|e| ParserError::Selector(format!("{src}: {e}")))
}

fn text_of(el: ElementRef) -> String {
    clean_text(&el.text().collect::<String>())
}
