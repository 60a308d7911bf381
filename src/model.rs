// Core structs: Listing, requests, errors
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SOURCE: &str = "marktplaats";
pub const CURRENCY: &str = "EUR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    Fixed,
    Negotiable,
    Free,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub price: Option<f64>,
    pub price_text: String,
    pub price_type: PriceType,
    pub currency: String,
    pub location: String,
    pub description: String,
    pub url: String,
    pub image: String,
    pub date: String,
    pub seller_name: String,
    pub source: String,
    pub fetched_at: DateTime<Utc>,
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            price: None,
            price_text: String::new(),
            price_type: PriceType::Unknown,
            currency: CURRENCY.to_string(),
            location: String::new(),
            description: String::new(),
            url: String::new(),
            image: String::new(),
            date: String::new(),
            seller_name: String::new(),
            source: SOURCE.to_string(),
            fetched_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Relevance,
    #[serde(alias = "asc", alias = "price-asc")]
    PriceAsc,
    #[serde(alias = "desc", alias = "price-desc")]
    PriceDesc,
}

/// A single page request against the site, with the query already in Dutch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapeRequest {
    pub query: String,
    pub category: Option<String>,
    pub offset: usize,
    pub limit: usize,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub postcode: Option<String>,
    pub distance_km: Option<u32>,
}

/// One user-facing search before translation.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: usize,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: SortOrder,
    pub category: Option<String>,
    pub postcode: Option<String>,
    pub distance_km: Option<u32>,
    /// Skips translation when the query is already in Dutch search terms.
    pub pre_translated: bool,
}

/// Raw body returned by the site.
#[derive(Debug, Clone)]
pub enum Page {
    Json(String),
    Html(String),
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("http error: {0}")]
    HttpError(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("request timed out")]
    Timeout,
    #[error("invalid url {0}")]
    InvalidUrl(String),
}

impl From<url::ParseError> for ScraperError {
    fn from(e: url::ParseError) -> Self {
        ScraperError::InvalidUrl(e.to_string())
    }
}

impl From<reqwest::Error> for ScraperError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ScraperError::Timeout
        } else if let Some(status) = e.status() {
            ScraperError::Status(status.as_u16())
        } else {
            ScraperError::HttpError(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid selector {0}")]
    Selector(String),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Scraper(#[from] ScraperError),
    #[error(transparent)]
    Parser(#[from] ParserError),
}
