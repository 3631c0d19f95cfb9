//! Crawler module for catalog harvesting
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching over one reused client
//! - Listing page parsing (product summaries and pagination)
//! - Detail page parsing (category, image, UPC)
//! - The fixed per-item throttle
//! - Overall crawl coordination

mod coordinator;
mod detail;
mod fetcher;
mod listing;
mod parser;
mod report;
mod throttle;

pub use coordinator::{run_harvest, Coordinator};
pub use detail::parse_detail;
pub use fetcher::{build_http_client, fetch_url, FetchResult, Fetcher};
pub use listing::{parse_listing, ListingPage};
pub use parser::ParseError;
pub use report::{HarvestReport, StopReason};
pub use throttle::Throttle;

use crate::config::CrawlerConfig;

/// Runs a complete harvest
///
/// This is the main entry point for a crawl. It will:
/// 1. Build the HTTP client
/// 2. Walk the listing pages from the base URL
/// 3. Fetch every product's detail page
/// 4. Stop at the item cap, the last page, or a listing failure
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(HarvestReport)` - The records gathered and why the crawl stopped
/// * `Err(HarvestError)` - The crawl could not be started
pub async fn harvest(config: &CrawlerConfig) -> crate::Result<HarvestReport> {
    run_harvest(config).await
}
