//! Record types produced by the harvester
//!
//! - `ListingItem`: the summary fields scraped from a listing page
//! - `DetailFields`: the supplementary fields scraped from a detail page
//! - `ProductRecord`: the two combined and stamped, one row of the dataset

mod fields;
mod product;

pub use product::{timestamp_now, DetailFields, ListingItem, ProductRecord, COLUMNS, TIMESTAMP_FORMAT};
