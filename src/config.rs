use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::warn;

use crate::model::ConfigError;

/// Env var that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "MARKT_SCOUT_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_address: String,
    pub base_url: String,
    pub user_agent: String,
    pub accept_language: String,
    pub request_timeout_secs: u64,
    /// Pause before every outgoing request, plus up to `request_jitter_ms`.
    pub request_delay_ms: u64,
    pub request_jitter_ms: u64,
    /// Listings per result page the site hands out.
    pub page_size: usize,
    pub max_pages: usize,
    pub default_max_results: usize,
    pub max_results_cap: usize,
    pub max_queries: usize,
    pub concurrency: usize,
    pub default_city: String,
    pub default_distance_km: u32,
    pub style_item_types: Vec<String>,
    pub save_debug_html: bool,
    pub debug_html_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".into(),
            base_url: "https://www.marktplaats.nl".into(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".into(),
            accept_language: "nl-NL,nl;q=0.9,en;q=0.8".into(),
            request_timeout_secs: 30,
            request_delay_ms: 1000,
            request_jitter_ms: 250,
            page_size: 30,
            max_pages: 4,
            default_max_results: 30,
            max_results_cap: 100,
            max_queries: 10,
            concurrency: 3,
            default_city: "Amsterdam".into(),
            default_distance_km: 20,
            style_item_types: ["chair", "table", "lamp", "couch", "cabinet"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            save_debug_html: true,
            debug_html_dir: "logs/html".into(),
        }
    }
}

impl AppConfig {
    /// Clamps a requested result count into `1..=max_results_cap`.
    pub fn clamp_results(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_max_results)
            .clamp(1, self.max_results_cap.max(1))
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Config {} not found, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Resolves the config path from `MARKT_SCOUT_CONFIG`, falling back to `config.json`.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}
