//! Fixed-interval request throttle
//!
//! The harvester never adapts its pace: after every product it waits the
//! same configured delay before doing anything else, whether or not the
//! product's detail page could be fetched.

use crate::config::CrawlerConfig;
use std::time::Duration;

/// Blocks the crawl for a fixed delay after each harvested item
#[derive(Debug, Clone)]
pub struct Throttle {
    delay: Duration,
    pauses: u32,
}

impl Throttle {
    /// Creates a throttle with the given delay
    pub fn new(delay: Duration) -> Self {
        Self { delay, pauses: 0 }
    }

    /// Creates a throttle from the crawler's `delay-ms` setting
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(config.delay())
    }

    /// Waits out the delay
    pub async fn pause(&mut self) {
        self.pauses = self.pauses.saturating_add(1);
        if self.delay.is_zero() {
            return;
        }

        tracing::trace!("Pausing {:?} before next request", self.delay);
        tokio::time::sleep(self.delay).await;
    }

    /// The configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// How many times `pause` has been called
    pub fn pauses(&self) -> u32 {
        self.pauses
    }

    /// Total time spent (or to be spent) pausing so far
    pub fn total_paused(&self) -> Duration {
        self.delay.saturating_mul(self.pauses)
    }
}
