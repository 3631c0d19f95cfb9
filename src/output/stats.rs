//! Harvest statistics and console listing

use crate::crawler::{HarvestReport, StopReason};
use crate::record::ProductRecord;

/// Harvest statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestStatistics {
    /// Number of records collected
    pub total_records: usize,

    /// Listing pages fetched
    pub pages_visited: usize,

    /// Records whose detail page failed
    pub detail_failures: usize,

    /// Records with a category
    pub with_category: usize,

    /// Records with an image URL
    pub with_image: usize,

    /// Records with a UPC
    pub with_upc: usize,

    /// Why the crawl ended
    pub stop_reason: StopReason,
}

impl HarvestStatistics {
    /// Computes statistics for a finished harvest
    pub fn from_report(report: &HarvestReport) -> Self {
        let records = &report.records;
        Self {
            total_records: records.len(),
            pages_visited: report.pages_visited,
            detail_failures: report.detail_failures,
            with_category: records.iter().filter(|r| r.category.is_some()).count(),
            with_image: records.iter().filter(|r| r.image_url.is_some()).count(),
            with_upc: records.iter().filter(|r| r.upc.is_some()).count(),
            stop_reason: report.stop_reason.clone(),
        }
    }
}

/// Formats the numbered `name - price - category` listing
pub fn format_record_lines(records: &[ProductRecord]) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{}. {} - {} - {}",
                i + 1,
                r.name,
                r.price,
                r.category.as_deref().unwrap_or("")
            )
        })
        .collect()
}

/// Prints the harvested records to stdout
pub fn print_records(records: &[ProductRecord]) {
    if records.is_empty() {
        println!("No products scraped.");
        return;
    }

    println!("\nScraped {} products:", records.len());
    for line in format_record_lines(records) {
        println!("{}", line);
    }
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &HarvestStatistics) {
    println!("\n=== Harvest Statistics ===");
    println!("Products:           {}", stats.total_records);
    println!("Listing pages:      {}", stats.pages_visited);
    println!("Detail failures:    {}", stats.detail_failures);
    println!("With category:      {}", stats.with_category);
    println!("With image:         {}", stats.with_image);
    println!("With UPC:           {}", stats.with_upc);
    println!("Stopped because:    {}", stats.stop_reason);
}
