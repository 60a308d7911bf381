//! REST API handlers

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::{Deserialize, Serialize};

use super::AppState;
use super::error::ApiError;
use crate::model::{SearchRequest, SortOrder};
use crate::query::PREDEFINED_PROMPTS;
use crate::service::{
    MultiSearchOutcome, SearchOptions, SearchOutcome, SmartSearchOutcome, StyleCollection,
};

const ENDPOINTS: &[&str] = &[
    "GET /health",
    "GET /search",
    "POST /smart-search",
    "POST /multi-search",
    "POST /style-collection",
];

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    pub endpoints: &'static [&'static str],
    pub prompts: &'static [&'static str],
}

pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Marktplaats Scraper API",
        endpoints: ENDPOINTS,
        prompts: PREDEFINED_PROMPTS,
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(alias = "q")]
    pub query: Option<String>,
    pub max_results: Option<usize>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<SortOrder>,
    pub category: Option<String>,
    pub postcode: Option<String>,
    pub distance: Option<u32>,
}

pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchOutcome>, ApiError> {
    let Query(params) = params?;
    let config = state.service.config();
    let postcode = params.postcode.filter(|p| !p.trim().is_empty());
    let distance_km = postcode
        .as_ref()
        .map(|_| params.distance.unwrap_or(config.default_distance_km));

    let req = SearchRequest {
        query: params.query.unwrap_or_default(),
        max_results: config.clamp_results(params.max_results),
        min_price: params.min_price,
        max_price: params.max_price,
        sort: params.sort.unwrap_or_default(),
        category: params.category.filter(|c| !c.trim().is_empty()),
        postcode,
        distance_km,
        pre_translated: false,
    };
    Ok(Json(state.service.search(req).await?))
}

#[derive(Debug, Deserialize)]
pub struct SmartSearchRequest {
    #[serde(default)]
    pub query: String,
    pub max_results: Option<usize>,
}

pub async fn smart_search(
    State(state): State<AppState>,
    body: Result<Json<SmartSearchRequest>, JsonRejection>,
) -> Result<Json<SmartSearchOutcome>, ApiError> {
    let Json(body) = body?;
    let outcome = state
        .service
        .smart_search(&body.query, body.max_results)
        .await?;
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
pub struct MultiSearchRequest {
    #[serde(default)]
    pub queries: Vec<String>,
    pub max_results_per_query: Option<usize>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    #[serde(default)]
    pub sort: SortOrder,
}

pub async fn multi_search(
    State(state): State<AppState>,
    body: Result<Json<MultiSearchRequest>, JsonRejection>,
) -> Result<Json<MultiSearchOutcome>, ApiError> {
    let Json(body) = body?;
    let options = SearchOptions {
        max_results: body.max_results_per_query,
        min_price: body.min_price,
        max_price: body.max_price,
        sort: body.sort,
    };
    Ok(Json(state.service.multi_search(&body.queries, options).await?))
}

#[derive(Debug, Deserialize)]
pub struct StyleCollectionRequest {
    #[serde(default)]
    pub style: String,
    pub item_types: Option<Vec<String>>,
    pub max_results_per_type: Option<usize>,
    pub max_price: Option<f64>,
}

pub async fn style_collection(
    State(state): State<AppState>,
    body: Result<Json<StyleCollectionRequest>, JsonRejection>,
) -> Result<Json<StyleCollection>, ApiError> {
    let Json(body) = body?;
    let collection = state
        .service
        .style_collection(
            &body.style,
            body.item_types,
            body.max_results_per_type,
            body.max_price,
        )
        .await?;
    Ok(Json(collection))
}
