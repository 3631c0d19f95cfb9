//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building the one HTTP client reused for the whole run
//! - GET requests with a bounded timeout
//! - Error classification
//!
//! There is no retry logic. A failed fetch is logged and reported to the
//! caller, which decides whether that ends the crawl or just one record.

use crate::config::CrawlerConfig;
use reqwest::Client;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (DNS, connection refused, timeout, broken body)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Consumes the result, keeping only the markup of a successful fetch
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Success { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Builds the HTTP client shared by every request of a run
///
/// Connections are pooled by the client, so TCP/TLS setup to the catalog
/// host happens once rather than per request.
///
/// # Arguments
///
/// * `config` - The crawler configuration (for the request timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!("catalog-harvester/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(config.request_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | Success |
/// | Any other status | HttpError |
/// | Timeout | NetworkError |
/// | Connection refused / DNS | NetworkError |
/// | Body read failure | NetworkError |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// A FetchResult indicating success or the type of failure
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            if e.is_timeout() {
                FetchResult::NetworkError {
                    error: "Request timeout".to_string(),
                }
            } else if e.is_connect() {
                FetchResult::NetworkError {
                    error: format!("Connection failed: {}", e),
                }
            } else {
                FetchResult::NetworkError {
                    error: e.to_string(),
                }
            }
        }
    }
}

/// Page fetcher owning the run's connection context
///
/// One `Fetcher` lives for exactly one crawl. Dropping it closes the
/// pooled connections.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Fetches a page, logging any failure
    pub async fn fetch(&self, url: &Url) -> FetchResult {
        let result = fetch_url(&self.client, url.as_str()).await;

        match &result {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                tracing::debug!(
                    "Fetched {} (status {}, {} bytes, final url {})",
                    url,
                    status_code,
                    body.len(),
                    final_url
                );
            }
            FetchResult::HttpError { status_code } => {
                tracing::error!("Request failed for {}: HTTP status {}", url, status_code);
            }
            FetchResult::NetworkError { error } => {
                tracing::error!("Request failed for {}: {}", url, error);
            }
        }

        result
    }

    /// Fetches a page and returns its markup, or `None` on any failure
    pub async fn fetch_markup(&self, url: &Url) -> Option<String> {
        self.fetch(url).await.into_body()
    }
}
