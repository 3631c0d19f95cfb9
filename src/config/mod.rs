//! Configuration module for Catalog Harvester
//!
//! Every setting has a default, so a configuration file is optional. When
//! one is given it is TOML, parsed and then validated.
//!
//! # Example
//!
//! ```no_run
//! use catalog_harvester::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Harvesting at most {} products", config.crawler.max_products);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CrawlerConfig, HarvestConfig, OutputConfig, DEFAULT_BASE_URL};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
