use crate::config::AppConfig;
use crate::model::{Page, ScrapeRequest, ScraperError};
use crate::scraper::traits::Scraper;

use rand::Rng;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const API_PATH: &str = "/lrp/api/search";

pub struct ScraperImpl {
    pub client: Client,
    base_url: String,
    page_size: usize,
    delay: Duration,
    jitter_ms: u64,
}

impl ScraperImpl {
    pub fn new(config: &AppConfig) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(HTML_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)
                .map_err(|e| ScraperError::HttpError(e.to_string()))?,
        );

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size.max(1),
            delay: Duration::from_millis(config.request_delay_ms),
            jitter_ms: config.request_jitter_ms,
        })
    }

    fn base(&self) -> Result<Url, ScraperError> {
        Ok(Url::parse(&self.base_url)?)
    }

    /// URL of the JSON listing search API.
    pub fn build_api_url(&self, req: &ScrapeRequest) -> Result<Url, ScraperError> {
        let mut url = self.base()?.join(API_PATH)?;
        let limit = req.limit.clamp(1, self.page_size);

        let mut pairs: Vec<(&str, String)> = vec![
            ("query", req.query.clone()),
            ("searchInTitleAndDescription", "true".into()),
            ("offset", req.offset.to_string()),
            ("limit", limit.to_string()),
            ("sortBy", "SortIndex".into()),
            ("sortOrder", "decreasing".into()),
        ];
        if let Some(category) = req.category.as_deref().filter(|c| c.chars().all(|ch| ch.is_ascii_digit())) {
            pairs.push(("categoryId", category.to_string()));
        }
        push_price_pairs(&mut pairs, req);
        if let Some(postcode) = &req.postcode {
            pairs.push(("postcode", postcode.clone()));
            if let Some(km) = req.distance_km {
                pairs.push(("distanceMeters", (u64::from(km) * 1000).to_string()));
            }
        }

        url.query_pairs_mut().extend_pairs(pairs);
        Ok(url)
    }

    /// URL of the HTML result page: `/l/<category>/?q=..` or `/q/<query>/`.
    pub fn build_html_url(&self, req: &ScrapeRequest) -> Result<Url, ScraperError> {
        let mut url = self.base()?;
        let mut pairs: Vec<(&str, String)> = Vec::new();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ScraperError::InvalidUrl(self.base_url.clone()))?;
            segments.clear();
            match req.category.as_deref() {
                Some(category) => {
                    segments.push("l");
                    segments.extend(category.split('/').filter(|s| !s.is_empty()));
                    pairs.push(("q", req.query.clone()));
                }
                None => {
                    segments.push("q");
                    segments.push(&req.query);
                }
            }
            segments.push("");
        }

        push_price_pairs(&mut pairs, req);
        if let Some(postcode) = &req.postcode {
            pairs.push(("postcode", postcode.clone()));
            if let Some(km) = req.distance_km {
                pairs.push(("distance", km.to_string()));
            }
        }
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// Polite pause before hitting the site.
    async fn pause(&self) {
        let jitter = if self.jitter_ms > 0 {
            rand::rng().random_range(0..=self.jitter_ms)
        } else {
            0
        };
        let wait = self.delay + Duration::from_millis(jitter);
        if !wait.is_zero() {
            sleep(wait).await;
        }
    }

    /// Returns the body only when the API answered with JSON.
    async fn fetch_api(&self, req: &ScrapeRequest) -> Result<Option<String>, ScraperError> {
        let url = self.build_api_url(req)?;
        debug!("Requesting listing API: {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ScraperError::Status(response.status().as_u16()));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));
        let body = response.text().await?;
        Ok(is_json.then_some(body))
    }

    async fn fetch_html(&self, req: &ScrapeRequest) -> Result<String, ScraperError> {
        let url = self.build_html_url(req)?;
        info!("Scraping HTML from: {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ScraperError::Status(response.status().as_u16()));
        }
        Ok(response.text().await?)
    }
}

fn push_price_pairs(pairs: &mut Vec<(&str, String)>, req: &ScrapeRequest) {
    if let Some(min) = req.min_price {
        pairs.push(("priceFrom", min.to_string()));
    }
    if let Some(max) = req.max_price {
        pairs.push(("priceTo", max.to_string()));
    }
}

#[async_trait::async_trait]
impl Scraper for ScraperImpl {
    async fn fetch(&self, req: &ScrapeRequest) -> Result<Page, ScraperError> {
        self.pause().await;

        match self.fetch_api(req).await {
            Ok(Some(body)) => return Ok(Page::Json(body)),
            Ok(None) => info!("Listing API did not answer with JSON, falling back to HTML"),
            Err(e) => warn!("Listing API request failed ({}), falling back to HTML", e),
        }

        self.fetch_html(req).await.map(Page::Html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> AppConfig {
        AppConfig {
            base_url: base_url.to_string(),
            request_delay_ms: 0,
            request_jitter_ms: 0,
            ..AppConfig::default()
        }
    }

    fn request(query: &str) -> ScrapeRequest {
        ScrapeRequest {
            query: query.to_string(),
            limit: 30,
            ..ScrapeRequest::default()
        }
    }

    #[test]
    fn api_url_carries_paging_and_filters() {
        let scraper = ScraperImpl::new(&config("https://www.marktplaats.nl")).unwrap();
        let req = ScrapeRequest {
            query: "teak stoel".into(),
            offset: 30,
            limit: 100,
            max_price: Some(150.0),
            postcode: Some("1012".into()),
            distance_km: Some(20),
            ..ScrapeRequest::default()
        };
        let url = scraper.build_api_url(&req).unwrap();
        assert_eq!(url.path(), "/lrp/api/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let get = |k: &str| pairs.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());
        assert_eq!(get("query"), Some("teak stoel"));
        assert_eq!(get("offset"), Some("30"));
        assert_eq!(get("limit"), Some("30"));
        assert_eq!(get("priceTo"), Some("150"));
        assert_eq!(get("priceFrom"), None);
        assert_eq!(get("distanceMeters"), Some("20000"));
    }

    #[test]
    fn html_url_for_plain_query() {
        let scraper = ScraperImpl::new(&config("https://www.marktplaats.nl/")).unwrap();
        let url = scraper.build_html_url(&request("teak stoel")).unwrap();
        assert_eq!(url.as_str(), "https://www.marktplaats.nl/q/teak%20stoel/");
    }

    #[test]
    fn html_url_for_category_listing() {
        let scraper = ScraperImpl::new(&config("https://www.marktplaats.nl")).unwrap();
        let req = ScrapeRequest {
            query: "rond houten tafel".into(),
            category: Some("huis-en-inrichting-tafels-eettafels".into()),
            max_price: Some(150.0),
            postcode: Some("1012".into()),
            distance_km: Some(20),
            ..ScrapeRequest::default()
        };
        let url = scraper.build_html_url(&req).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.marktplaats.nl/l/huis-en-inrichting-tafels-eettafels/?q=rond+houten+tafel&priceTo=150&postcode=1012&distance=20"
        );
    }

    #[tokio::test]
    async fn json_api_response_is_used() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lrp/api/search"))
            .and(query_param("query", "stoel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"listings": []})))
            .expect(1)
            .mount(&server)
            .await;

        let scraper = ScraperImpl::new(&config(&server.uri())).unwrap();
        let page = scraper.fetch(&request("stoel")).await.unwrap();
        assert!(matches!(page, Page::Json(body) if body.contains("listings")));
    }

    #[tokio::test]
    async fn non_json_api_falls_back_to_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lrp/api/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>consent</html>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/q/stoel/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>results</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let scraper = ScraperImpl::new(&config(&server.uri())).unwrap();
        let page = scraper.fetch(&request("stoel")).await.unwrap();
        assert!(matches!(page, Page::Html(body) if body.contains("results")));
    }

    #[tokio::test]
    async fn failing_api_falls_back_to_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lrp/api/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/q/lamp/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>lampen</html>"))
            .mount(&server)
            .await;

        let scraper = ScraperImpl::new(&config(&server.uri())).unwrap();
        let page = scraper.fetch(&request("lamp")).await.unwrap();
        assert!(matches!(page, Page::Html(_)));
    }

    #[tokio::test]
    async fn html_error_status_is_reported() {
        let server = MockServer::start().await;
        let scraper = ScraperImpl::new(&config(&server.uri())).unwrap();
        let err = scraper.fetch(&request("kast")).await.unwrap_err();
        assert!(matches!(err, ScraperError::Status(404)));
    }

    fn impatient_config(base_url: &str) -> AppConfig {
        AppConfig {
            request_timeout_secs: 1,
            ..config(base_url)
        }
    }

    #[tokio::test]
    async fn api_timeout_falls_back_to_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lrp/api/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"listings": []}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/q/bank/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>banken</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let scraper = ScraperImpl::new(&impatient_config(&server.uri())).unwrap();
        let page = scraper.fetch(&request("bank")).await.unwrap();
        assert!(matches!(page, Page::Html(body) if body.contains("banken")));
    }

    #[tokio::test]
    async fn html_timeout_is_reported_as_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lrp/api/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/q/bank/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html>te laat</html>")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let scraper = ScraperImpl::new(&impatient_config(&server.uri())).unwrap();
        let err = scraper.fetch(&request("bank")).await.unwrap_err();
        assert!(matches!(err, ScraperError::Timeout), "{err:?}");
    }
}
