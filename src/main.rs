use markt_scout::config::{AppConfig, config_path, load_config};
use markt_scout::scraper::ScraperImpl;
use markt_scout::server;
use markt_scout::service::MarketService;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    // Load configuration from file
    let path = config_path();
    let config: Arc<AppConfig> = match load_config(&path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error ({}): {}", path, e);
            return;
        }
    };

    let scraper = match ScraperImpl::new(&config) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };

    let service = match MarketService::new(scraper, config.clone()) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Failed to initialize parser: {}", e);
            return;
        }
    };

    info!("Scraping {} with up to {} concurrent queries", config.base_url, config.concurrency);
    if let Err(e) = server::serve(service).await {
        error!("Server error: {}", e);
    }
}
