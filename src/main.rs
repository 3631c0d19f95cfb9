//! Catalog Harvester main entry point
//!
//! This is the command-line interface for the Catalog Harvester.

use catalog_harvester::config::{load_config, validate, HarvestConfig};
use catalog_harvester::crawler::harvest;
use catalog_harvester::output::{print_records, print_statistics, save_dataset, HarvestStatistics};
use catalog_harvester::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog Harvester: a polite product catalog scraper
///
/// Walks a paginated product listing, visits each product's detail page,
/// and saves the results as CSV or Excel.
#[derive(Parser, Debug)]
#[command(name = "catalog-harvester")]
#[command(version)]
#[command(about = "A polite product catalog scraper", long_about = None)]
struct Cli {
    /// First listing page of the catalog [default: https://books.toscrape.com/]
    #[arg(value_name = "BASE_URL")]
    base_url: Option<String>,

    /// Maximum number of products to harvest [default: 20]
    #[arg(short = 'n', long)]
    max_products: Option<usize>,

    /// Output format: csv or excel [default: csv]
    #[arg(short, long)]
    format: Option<String>,

    /// Output file name without extension [default: scraped_products]
    #[arg(short, long, value_name = "FILENAME")]
    output: Option<String>,

    /// Pause after every product, in milliseconds [default: 1000]
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Per-request timeout, in seconds [default: 10]
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Optional TOML configuration file; flags override its values
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Print harvest statistics after the product listing
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e);
        }
    };

    let report = harvest(&config.crawler).await?;

    print_records(&report.records);
    if cli.stats {
        print_statistics(&HarvestStatistics::from_report(&report));
    }

    if report.stop_reason.is_failure() {
        tracing::warn!("Harvest ended early: {}", report.stop_reason);
    }

    if report.is_empty() {
        return Ok(());
    }

    if let Some(path) = save_dataset(
        &report.records,
        &config.output.filename,
        &config.output.format,
    )? {
        println!("\nSaved {} products to {}", report.len(), path.display());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_harvester=info,warn"),
            1 => EnvFilter::new("catalog_harvester=debug,info"),
            2 => EnvFilter::new("catalog_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Layers command-line flags over the config file (or the defaults)
fn build_config(cli: &Cli) -> Result<HarvestConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => HarvestConfig::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config.crawler.base_url = base_url.clone();
    }
    if let Some(max_products) = cli.max_products {
        config.crawler.max_products = max_products;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.delay_ms = delay_ms;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.crawler.request_timeout_secs = timeout_secs;
    }
    if let Some(format) = &cli.format {
        config.output.format = format.clone();
    }
    if let Some(output) = &cli.output {
        config.output.filename = output.clone();
    }

    validate(&config)?;
    Ok(config)
}
