// Analyzer module: dedupe, price filtering, sorting and summary stats.

pub mod dedup;
pub mod price_analysis;

// Re-export the main Analyzer implementation for ease of use.
pub use dedup::{count_unique, dedupe_by_id};
pub use price_analysis::{Analyzer, AnalyzerImpl, PriceFilter, PriceStats};
