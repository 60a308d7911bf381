pub mod analyzer;
pub mod config;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod query;
pub mod scraper;
pub mod server;
pub mod service;
pub mod utils;
