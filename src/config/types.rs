use serde::Deserialize;
use std::time::Duration;

/// Catalog root used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://books.toscrape.com/";

/// Main configuration structure for Catalog Harvester
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HarvestConfig {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// First listing page of the catalog
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Stop after this many products
    #[serde(rename = "max-products")]
    pub max_products: usize,

    /// Pause after every product (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_products: 20,
            delay_ms: 1000,
            request_timeout_secs: 10,
        }
    }
}

impl CrawlerConfig {
    /// The per-item pause as a `Duration`
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// The per-request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Dataset output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name without extension
    pub filename: String,

    /// Format token, `csv` or `excel`
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filename: "scraped_products".to_string(),
            format: "csv".to_string(),
        }
    }
}
