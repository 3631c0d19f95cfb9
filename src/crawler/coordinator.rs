//! Crawl coordinator - main harvest orchestration logic
//!
//! This module contains the crawl loop:
//! - Walking listing pages from the base URL along "next" links
//! - Fetching and parsing each product's detail page
//! - Assembling and stamping records
//! - Enforcing the item cap and the per-item delay
//!
//! Everything happens strictly one request at a time.

use crate::config::CrawlerConfig;
use crate::crawler::detail::parse_detail;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::listing::parse_listing;
use crate::crawler::report::{HarvestReport, StopReason};
use crate::crawler::throttle::Throttle;
use crate::record::{timestamp_now, DetailFields, ListingItem, ProductRecord};
use crate::url::parse_base_url;
use std::time::Instant;
use url::Url;

/// Main harvest coordinator structure
///
/// The coordinator owns the run's connection context; `run` consumes it,
/// so the HTTP client is released however the crawl ends.
pub struct Coordinator {
    base_url: Url,
    max_products: usize,
    fetcher: Fetcher,
    throttle: Throttle,
    detail_failures: usize,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(HarvestError)` - Bad base URL or the HTTP client could not be built
    pub fn new(config: &CrawlerConfig) -> crate::Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let fetcher = Fetcher::new(config)?;

        Ok(Self {
            base_url,
            max_products: config.max_products,
            fetcher,
            throttle: Throttle::from_config(config),
            detail_failures: 0,
        })
    }

    /// Runs the crawl loop to completion
    ///
    /// The loop continues while there is a listing page to visit and fewer
    /// than `max_products` records have been collected. It ends early, with
    /// the records gathered so far, when a listing page cannot be fetched or
    /// lacks a required field.
    pub async fn run(mut self) -> HarvestReport {
        tracing::info!(
            "Starting harvest at {} (max {} products, {:?} delay)",
            self.base_url,
            self.max_products,
            self.throttle.delay()
        );

        let start_time = Instant::now();
        let mut records: Vec<ProductRecord> = Vec::new();
        let mut pages_visited = 0;
        let mut current_listing_url = Some(self.base_url.clone());

        let stop_reason = loop {
            if records.len() >= self.max_products {
                break StopReason::ItemCapReached;
            }

            let listing_url = match current_listing_url.take() {
                Some(url) => url,
                None => break StopReason::LastPage,
            };

            tracing::debug!("Fetching listing page {}", listing_url);
            let html = match self.fetcher.fetch_markup(&listing_url).await {
                Some(html) => html,
                None => {
                    break StopReason::ListingUnavailable {
                        url: listing_url.to_string(),
                    }
                }
            };
            pages_visited += 1;

            let page = match parse_listing(&html, &self.base_url, &listing_url) {
                Ok(page) => page,
                Err(error) => {
                    tracing::error!("Failed to parse listing page {}: {}", listing_url, error);
                    break StopReason::StructuralFailure {
                        url: listing_url.to_string(),
                        error,
                    };
                }
            };

            for item in page.items {
                if records.len() >= self.max_products {
                    break;
                }

                let record = self.harvest_item(item).await;
                tracing::info!("Scraped {}: {}", records.len() + 1, record.name);
                records.push(record);

                self.throttle.pause().await;
            }

            current_listing_url = page.next_page;
        };

        tracing::info!(
            "Harvest finished: {} products from {} listing pages in {:?} ({})",
            records.len(),
            pages_visited,
            start_time.elapsed(),
            stop_reason
        );
        tracing::debug!(
            "Paused {} times, {:?} in total",
            self.throttle.pauses(),
            self.throttle.total_paused()
        );
        if self.detail_failures > 0 {
            tracing::warn!(
                "{} products are missing detail fields",
                self.detail_failures
            );
        }

        HarvestReport {
            records,
            pages_visited,
            detail_failures: self.detail_failures,
            stop_reason,
        }
    }

    /// Fetches the detail page for one listing item and builds its record
    async fn harvest_item(&mut self, item: ListingItem) -> ProductRecord {
        let detail = match self.fetch_details(&item.url).await {
            Some(detail) => detail,
            None => {
                self.detail_failures += 1;
                DetailFields::default()
            }
        };

        ProductRecord::assemble(item, detail, timestamp_now())
    }

    /// Returns `None` if the detail page could not be fetched or read
    async fn fetch_details(&self, url: &Url) -> Option<DetailFields> {
        let html = self.fetcher.fetch_markup(url).await?;

        match parse_detail(&html, &self.base_url) {
            Ok(detail) => {
                if detail.is_empty() {
                    tracing::debug!("No detail fields found on {}", url);
                }
                Some(detail)
            }
            Err(e) => {
                tracing::warn!("Failed to parse detail page {}: {}", url, e);
                None
            }
        }
    }
}

/// Runs a complete harvest with the given crawler configuration
pub async fn run_harvest(config: &CrawlerConfig) -> crate::Result<HarvestReport> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}
