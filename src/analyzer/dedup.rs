use crate::model::Listing;
use std::collections::HashSet;

/// Keeps the first listing for each id, preserving order.
pub fn dedupe_by_id(listings: Vec<Listing>) -> Vec<Listing> {
    let mut seen: HashSet<String> = HashSet::new();
    listings
        .into_iter()
        .filter(|l| seen.insert(l.id.clone()))
        .collect()
}

/// Number of distinct listing ids across several result sets.
pub fn count_unique<'a>(sets: impl IntoIterator<Item = &'a [Listing]>) -> usize {
    sets.into_iter()
        .flatten()
        .map(|l| l.id.as_str())
        .collect::<HashSet<_>>()
        .len()
}
