use crate::model::{Listing, SortOrder};
use serde::Serialize;
use std::cmp::Ordering;

/// Summary of the numeric prices in a result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStats {
    pub count: usize,
    pub priced: usize,
    pub avg_price: Option<f64>,
    pub median_price: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceFilter {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceFilter {
    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    fn accepts(&self, price: Option<f64>) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(price) = price else {
            return false;
        };
        self.min.is_none_or(|min| price >= min) && self.max.is_none_or(|max| price <= max)
    }
}

/// Trait defining the interface for a result-set analyzer.
pub trait Analyzer {
    fn calculate_stats(&self, listings: &[Listing]) -> PriceStats;
    fn filter_by_price(&self, listings: Vec<Listing>, filter: &PriceFilter) -> Vec<Listing>;
    fn sort(&self, listings: &mut [Listing], order: SortOrder);
}

pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AnalyzerImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for AnalyzerImpl {
    fn calculate_stats(&self, listings: &[Listing]) -> PriceStats {
        let mut prices: Vec<f64> = listings
            .iter()
            .filter_map(|l| l.price)
            .filter(|p| p.is_finite())
            .collect();
        prices.sort_by(f64::total_cmp);

        let priced = prices.len();
        let (avg, median) = if priced == 0 {
            (None, None)
        } else {
            let avg = prices.iter().sum::<f64>() / priced as f64;
            let mid = priced / 2;
            let median = if priced % 2 == 0 {
                (prices[mid - 1] + prices[mid]) / 2.0
            } else {
                prices[mid]
            };
            (Some(avg), Some(median))
        };

        PriceStats {
            count: listings.len(),
            priced,
            avg_price: avg,
            median_price: median,
            min_price: prices.first().copied(),
            max_price: prices.last().copied(),
        }
    }

    /// Drops listings outside the bounds; unpriced listings go when any bound is set.
    fn filter_by_price(&self, listings: Vec<Listing>, filter: &PriceFilter) -> Vec<Listing> {
        listings
            .into_iter()
            .filter(|l| filter.accepts(l.price))
            .collect()
    }

    /// Stable price sort. Unpriced listings trail in both directions.
    fn sort(&self, listings: &mut [Listing], order: SortOrder) {
        if order == SortOrder::Relevance {
            return;
        }
        listings.sort_by(|a, b| compare_prices(a.price, b.price, order));
    }
}

fn compare_prices(a: Option<f64>, b: Option<f64>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => match order {
            SortOrder::PriceDesc => y.total_cmp(&x),
            _ => x.total_cmp(&y),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, price: Option<f64>) -> Listing {
        Listing {
            id: id.into(),
            title: id.into(),
            price,
            ..Listing::default()
        }
    }

    fn ids(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.id.as_str()).collect()
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing("a", Some(50.0)),
            listing("b", None),
            listing("c", Some(10.0)),
            listing("d", Some(50.0)),
            listing("e", Some(120.0)),
        ]
    }

    #[test]
    fn ascending_keeps_unpriced_last_and_ties_stable() {
        let mut l = sample();
        AnalyzerImpl::new().sort(&mut l, SortOrder::PriceAsc);
        assert_eq!(ids(&l), ["c", "a", "d", "e", "b"]);
    }

    #[test]
    fn descending_keeps_unpriced_last() {
        let mut l = sample();
        AnalyzerImpl::new().sort(&mut l, SortOrder::PriceDesc);
        assert_eq!(ids(&l), ["e", "a", "d", "c", "b"]);
    }

    #[test]
    fn relevance_keeps_site_order() {
        let mut l = sample();
        AnalyzerImpl::new().sort(&mut l, SortOrder::Relevance);
        assert_eq!(ids(&l), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn filter_bounds_are_inclusive() {
        let filter = PriceFilter {
            min: Some(10.0),
            max: Some(50.0),
        };
        let l = AnalyzerImpl::new().filter_by_price(sample(), &filter);
        assert_eq!(ids(&l), ["a", "c", "d"]);
    }

    #[test]
    fn inactive_filter_keeps_unpriced() {
        let l = AnalyzerImpl::new().filter_by_price(sample(), &PriceFilter::default());
        assert_eq!(l.len(), 5);
    }

    #[test]
    fn stats_over_priced_listings() {
        let stats = AnalyzerImpl::new().calculate_stats(&sample());
        assert_eq!(stats.count, 5);
        assert_eq!(stats.priced, 4);
        assert_eq!(stats.avg_price, Some(57.5));
        assert_eq!(stats.median_price, Some(50.0));
        assert_eq!(stats.min_price, Some(10.0));
        assert_eq!(stats.max_price, Some(120.0));
    }

    #[test]
    fn stats_on_empty_input() {
        let stats = AnalyzerImpl::new().calculate_stats(&[]);
        assert_eq!(stats.priced, 0);
        assert_eq!(stats.avg_price, None);
        assert_eq!(stats.median_price, None);
    }
}
