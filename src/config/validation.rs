use crate::config::types::{CrawlerConfig, HarvestConfig, OutputConfig};
use crate::url::parse_base_url;
use crate::{ConfigError, ConfigResult};

/// Validates the entire configuration
pub fn validate(config: &HarvestConfig) -> ConfigResult<()> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    parse_base_url(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if config.max_products < 1 {
        return Err(ConfigError::Validation(format!(
            "max-products must be >= 1, got {}",
            config.max_products
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
///
/// The format token is left alone: an unknown token is reported by the
/// sink at save time.
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.filename.trim().is_empty() {
        return Err(ConfigError::Validation(
            "filename cannot be empty".to_string(),
        ));
    }

    Ok(())
}
