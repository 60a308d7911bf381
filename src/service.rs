//! Search pipelines: build request -> fetch -> parse -> normalize -> filter/sort.

use chrono::Utc;
use futures::FutureExt;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::analyzer::{Analyzer, AnalyzerImpl, PriceFilter, PriceStats, count_unique, dedupe_by_id};
use crate::config::AppConfig;
use crate::model::{Listing, Page, ParserError, ScrapeRequest, SearchRequest, ServiceError, SortOrder};
use crate::normalizer::normalize_all;
use crate::parser::{MarktplaatsParser, Parser};
use crate::query::{self, ParsedQuery};
use crate::scraper::Scraper;

#[derive(Debug, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub search_terms: String,
    pub total: usize,
    pub stats: PriceStats,
    pub items: Vec<Listing>,
}

#[derive(Debug, Serialize)]
pub struct SmartSearchOutcome {
    pub query: String,
    pub parsed_query: ParsedQuery,
    pub search_terms: String,
    pub total: usize,
    pub stats: PriceStats,
    pub items: Vec<Listing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// Options shared by every query of a fan-out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    pub max_results: Option<usize>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: SortOrder,
}

#[derive(Debug, Serialize)]
pub struct QueryResult {
    pub query: String,
    pub search_terms: String,
    pub total: usize,
    pub items: Vec<Listing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MultiSearchOutcome {
    pub results: Vec<QueryResult>,
    pub total: usize,
    pub unique_total: usize,
}

#[derive(Debug, Serialize)]
pub struct StyleSection {
    pub item_type: String,
    pub queries: Vec<String>,
    pub total: usize,
    pub items: Vec<Listing>,
}

#[derive(Debug, Serialize)]
pub struct StyleCollection {
    pub style: String,
    pub sections: Vec<StyleSection>,
    pub total: usize,
}

pub struct MarketService {
    scraper: Arc<dyn Scraper>,
    parser: MarktplaatsParser,
    analyzer: AnalyzerImpl,
    config: Arc<AppConfig>,
}

impl MarketService {
    pub fn new(scraper: Arc<dyn Scraper>, config: Arc<AppConfig>) -> Result<Self, ParserError> {
        Ok(Self {
            scraper,
            parser: MarktplaatsParser::new()?,
            analyzer: AnalyzerImpl::new(),
            config,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs one search end to end.
    pub async fn search(&self, req: SearchRequest) -> Result<SearchOutcome, ServiceError> {
        let raw = req.query.trim().to_string();
        if raw.is_empty() {
            return Err(ServiceError::BadRequest("query must not be empty".into()));
        }
        check_bounds(req.min_price, req.max_price)?;

        let terms = if req.pre_translated {
            raw.clone()
        } else {
            query::translate_query(&raw)
        };
        let max_results = req.max_results.max(1);
        info!("Searching for: {} (terms: {})", raw, terms);

        let page_size = self.config.page_size.max(1);
        let limit = max_results.min(page_size);
        let filter = PriceFilter {
            min: req.min_price,
            max: req.max_price,
        };
        let mut collected: Vec<Listing> = Vec::new();

        for page_no in 0..self.config.max_pages.max(1) {
            let scrape = ScrapeRequest {
                query: terms.clone(),
                category: req.category.clone(),
                offset: page_no * limit,
                limit,
                min_price: req.min_price,
                max_price: req.max_price,
                postcode: req.postcode.clone(),
                distance_km: req.distance_km,
            };

            let page = match self.scraper.fetch(&scrape).await {
                Ok(page) => page,
                Err(e) if page_no == 0 => return Err(e.into()),
                Err(e) => {
                    warn!("Stopping after page {} for '{}': {}", page_no, terms, e);
                    break;
                }
            };
            let is_html = matches!(page, Page::Html(_));

            let listings = self.parse_page(&page, &terms)?;
            let got = listings.len();
            // Only listings inside the price bounds count towards max_results.
            collected.extend(self.analyzer.filter_by_price(listings, &filter));
            collected = dedupe_by_id(collected);

            if is_html || got < limit || collected.len() >= max_results {
                break;
            }
        }

        let mut items = collected;
        self.analyzer.sort(&mut items, req.sort);
        items.truncate(max_results);
        let stats = self.analyzer.calculate_stats(&items);
        info!("Search '{}' returned {} listings", terms, items.len());

        Ok(SearchOutcome {
            query: raw,
            search_terms: terms,
            total: items.len(),
            stats,
            items,
        })
    }

    fn parse_page(&self, page: &Page, terms: &str) -> Result<Vec<Listing>, ParserError> {
        let mut listings = self.parser.parse(page)?;
        if listings.is_empty() {
            if let Page::Html(html) = page {
                warn!("No listings parsed for '{}'", terms);
                if self.config.save_debug_html {
                    log_and_save_html(&self.config.debug_html_dir, html, terms);
                }
            }
        }
        normalize_all(&mut listings, &self.config.base_url);
        Ok(listings)
    }

    /// Parses a natural-language query and searches with what it understood.
    pub async fn smart_search(
        &self,
        raw: &str,
        max_results: Option<usize>,
    ) -> Result<SmartSearchOutcome, ServiceError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ServiceError::BadRequest("query must not be empty".into()));
        }

        let parsed = query::parse_query(raw, &self.config.default_city);
        let terms = query::search_terms(&parsed, raw);
        let suggestions = query::suggestions(&parsed, raw);
        let postcode = query::city_postcode(&parsed.city).map(str::to_string);
        info!("Smart search '{}' parsed as {:?}", raw, parsed);

        let outcome = self
            .search(SearchRequest {
                query: terms,
                max_results: self.config.clamp_results(max_results),
                min_price: parsed.min_price,
                max_price: parsed.max_price,
                sort: SortOrder::Relevance,
                category: None,
                distance_km: postcode.as_ref().map(|_| self.config.default_distance_km),
                postcode,
                pre_translated: true,
            })
            .await?;

        Ok(SmartSearchOutcome {
            query: raw.to_string(),
            parsed_query: parsed,
            search_terms: outcome.search_terms,
            total: outcome.total,
            stats: outcome.stats,
            items: outcome.items,
            suggestions,
        })
    }

    /// Runs several searches with bounded concurrency. Failures stay per query.
    pub async fn multi_search(
        &self,
        queries: &[String],
        options: SearchOptions,
    ) -> Result<MultiSearchOutcome, ServiceError> {
        let mut distinct: Vec<String> = Vec::new();
        for q in queries.iter().map(|q| q.trim()).filter(|q| !q.is_empty()) {
            if !distinct.iter().any(|d| d.eq_ignore_ascii_case(q)) {
                distinct.push(q.to_string());
            }
        }
        if distinct.is_empty() {
            return Err(ServiceError::BadRequest("queries must not be empty".into()));
        }
        if distinct.len() > self.config.max_queries {
            return Err(ServiceError::BadRequest(format!(
                "at most {} queries per request",
                self.config.max_queries
            )));
        }
        check_bounds(options.min_price, options.max_price)?;

        let max_results = self.config.clamp_results(options.max_results);
        info!("Multi-search over {} queries", distinct.len());

        let results: Vec<QueryResult> = stream::iter(distinct)
            .map(|q| self.run_query(q, max_results, options).boxed())
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let total = results.iter().map(|r| r.total).sum();
        let unique_total = count_unique(results.iter().map(|r| r.items.as_slice()));
        Ok(MultiSearchOutcome {
            results,
            total,
            unique_total,
        })
    }

    async fn run_query(&self, q: String, max_results: usize, options: SearchOptions) -> QueryResult {
        let req = SearchRequest {
            query: q.clone(),
            max_results,
            min_price: options.min_price,
            max_price: options.max_price,
            sort: options.sort,
            ..SearchRequest::default()
        };
        match self.search(req).await {
            Ok(outcome) => QueryResult {
                query: q,
                search_terms: outcome.search_terms,
                total: outcome.total,
                items: outcome.items,
                error: None,
            },
            Err(e) => {
                warn!("Query '{}' failed: {}", q, e);
                QueryResult {
                    search_terms: query::translate_query(&q),
                    query: q,
                    total: 0,
                    items: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Crosses the style's terms with furniture types, one section per type.
    pub async fn style_collection(
        &self,
        style: &str,
        item_types: Option<Vec<String>>,
        per_type: Option<usize>,
        max_price: Option<f64>,
    ) -> Result<StyleCollection, ServiceError> {
        let style = style.trim();
        if style.is_empty() {
            return Err(ServiceError::BadRequest("style must not be empty".into()));
        }
        check_bounds(None, max_price)?;

        let mut items: Vec<String> = item_types
            .unwrap_or_default()
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();
        if items.is_empty() {
            items = self.config.style_item_types.clone();
        }
        if items.len() > self.config.max_queries {
            return Err(ServiceError::BadRequest(format!(
                "at most {} item types per request",
                self.config.max_queries
            )));
        }

        let style_terms = query::style_terms(style);
        let per_type = self.config.clamp_results(per_type);

        // (section index, dutch query)
        let plan: Vec<(usize, String)> = items
            .iter()
            .enumerate()
            .flat_map(|(idx, item)| {
                let nl = query::item_term(item);
                style_terms
                    .iter()
                    .map(move |term| (idx, format!("{term} {nl}")))
            })
            .collect();
        info!("Style collection '{}': {} queries", style, plan.len());

        let outcomes: Vec<(usize, String, Result<SearchOutcome, ServiceError>)> = stream::iter(plan)
            .map(|(idx, q)| {
                async move {
                    let req = SearchRequest {
                        query: q.clone(),
                        max_results: per_type,
                        max_price,
                        pre_translated: true,
                        ..SearchRequest::default()
                    };
                    let res = self.search(req).await;
                    (idx, q, res)
                }
                .boxed()
            })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let mut sections: Vec<StyleSection> = items
            .into_iter()
            .map(|item_type| StyleSection {
                item_type,
                queries: Vec::new(),
                total: 0,
                items: Vec::new(),
            })
            .collect();
        let mut first_error = None;
        let mut succeeded = 0;

        for (idx, q, res) in outcomes {
            let section = &mut sections[idx];
            section.queries.push(q.clone());
            match res {
                Ok(outcome) => {
                    succeeded += 1;
                    section.items.extend(outcome.items);
                }
                Err(e) => {
                    warn!("Style query '{}' failed: {}", q, e);
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        if succeeded == 0 {
            if let Some(e) = first_error {
                return Err(e);
            }
        }

        for section in &mut sections {
            let merged = dedupe_by_id(std::mem::take(&mut section.items));
            section.items = merged;
            section.items.truncate(per_type);
            section.total = section.items.len();
        }
        let total = sections.iter().map(|s| s.total).sum();

        Ok(StyleCollection {
            style: query::canonical_style(style)
                .map(str::to_string)
                .unwrap_or_else(|| style.to_string()),
            sections,
            total,
        })
    }
}

fn check_bounds(min: Option<f64>, max: Option<f64>) -> Result<(), ServiceError> {
    for bound in [min, max].into_iter().flatten() {
        if !bound.is_finite() || bound < 0.0 {
            return Err(ServiceError::BadRequest(format!("invalid price bound {bound}")));
        }
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(ServiceError::BadRequest(
                "min_price must not exceed max_price".into(),
            ));
        }
    }
    Ok(())
}

const DEBUG_SLUG_MAX: usize = 60;

/// Logs and saves the provided HTML for debugging selector misses.
fn log_and_save_html(dir: &str, html: &str, query: &str) -> Option<PathBuf> {
    let folder = Path::new(dir);
    if let Err(e) = fs::create_dir_all(folder) {
        warn!("Failed to create debug folder: {}", e);
        return None;
    }
    let slug: String = query
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .take(DEBUG_SLUG_MAX)
        .collect();
    let stamp = Utc::now().format("%Y%m%d-%H%M%S%.6f");
    let filename = folder.join(format!("debug-{}-{}.html", slug, stamp));
    if let Err(e) = fs::write(&filename, html) {
        warn!("Failed to write debug HTML: {}", e);
        return None;
    }
    info!("Saved debug HTML: {}", filename.display());
    Some(filename)
}
