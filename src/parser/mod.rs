mod api;
pub mod marktplaats_parser;
pub mod price;
mod selectors;

pub use marktplaats_parser::{MarktplaatsParser, Parser};
pub use price::{PriceInfo, extract_price};
