// Listing API (JSON) parsing
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::price::price_type_from_api;
use crate::model::{Listing, ParserError, PriceType};

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    listings: Option<Vec<Value>>,
    #[serde(rename = "_embedded", default)]
    embedded: Option<Embedded>,
}

#[derive(Debug, Deserialize)]
struct Embedded {
    #[serde(rename = "mp:search-result", default)]
    results: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ApiListing {
    item_id: String,
    title: String,
    description: String,
    vip_url: String,
    date: String,
    price_info: ApiPriceInfo,
    location: ApiLocation,
    seller_information: ApiSeller,
    pictures: Vec<ApiPicture>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ApiPriceInfo {
    price_cents: Option<i64>,
    price_type: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ApiLocation {
    city_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ApiSeller {
    seller_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ApiPicture {
    extra_extra_large_url: String,
    large_url: String,
}

impl From<ApiListing> for Listing {
    fn from(item: ApiListing) -> Self {
        let price_type = price_type_from_api(&item.price_info.price_type);
        let price = match (item.price_info.price_cents, price_type) {
            (Some(cents), _) if cents != 0 => Some(cents as f64 / 100.0),
            (_, PriceType::Free) => Some(0.0),
            _ => None,
        };
        let image = item
            .pictures
            .into_iter()
            .next()
            .map(|p| {
                if p.extra_extra_large_url.is_empty() {
                    p.large_url
                } else {
                    p.extra_extra_large_url
                }
            })
            .unwrap_or_default();

        Listing {
            id: item.item_id,
            title: item.title,
            price,
            price_text: item.price_info.price_type,
            price_type,
            location: item.location.city_name,
            description: item.description,
            url: item.vip_url,
            image,
            date: item.date,
            seller_name: item.seller_information.seller_name,
            ..Listing::default()
        }
    }
}

/// Parses a search API response. Items that fail to decode are skipped.
pub fn parse_api(body: &str) -> Result<Vec<Listing>, ParserError> {
    let response: ApiResponse = serde_json::from_str(body)?;
    let items = response
        .listings
        .or_else(|| response.embedded.and_then(|e| e.results))
        .unwrap_or_default();

    let mut listings = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<ApiListing>(item) {
            Ok(parsed) => listings.push(parsed.into()),
            Err(e) => {
                warn!("Failed to parse listing: {}", e);
                continue;
            }
        }
    }
    Ok(listings)
}
