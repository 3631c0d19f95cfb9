//! URL handling module for Catalog Harvester
//!
//! Every URL stored in a record is absolute. Product links and image
//! sources are joined onto the configured catalog root; only the pager's
//! "next" link is joined onto the listing page it appears on.

use crate::{UrlError, UrlResult};
use url::Url;

/// Parses a catalog root URL, accepting only HTTP(S) schemes
///
/// # Examples
///
/// ```
/// use catalog_harvester::url::parse_base_url;
///
/// let base = parse_base_url("https://books.toscrape.com/").unwrap();
/// assert_eq!(base.host_str(), Some("books.toscrape.com"));
/// assert!(parse_base_url("ftp://books.toscrape.com/").is_err());
/// ```
pub fn parse_base_url(raw: &str) -> UrlResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;
    ensure_http(url)
}

/// Resolves a (possibly relative) reference against `base`
///
/// Surrounding whitespace in the reference is ignored. The resolved URL
/// must still be HTTP(S).
///
/// # Arguments
///
/// * `base` - The URL the reference is joined onto
/// * `reference` - The raw `href` or `src` attribute value
///
/// # Returns
///
/// * `Ok(Url)` - The absolute URL
/// * `Err(UrlError)` - The reference is empty, unparseable, or not HTTP(S)
pub fn resolve_href(base: &Url, reference: &str) -> UrlResult<Url> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(UrlError::EmptyReference(base.to_string()));
    }

    let resolved = base
        .join(reference)
        .map_err(|e| UrlError::Parse(format!("{}: {}", reference, e)))?;
    ensure_http(resolved)
}

fn ensure_http(url: Url) -> UrlResult<Url> {
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UrlError::InvalidScheme(other.to_string())),
    }
}
