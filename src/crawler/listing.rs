//! Listing page parser
//!
//! A listing page holds a grid of product summaries and, unless it is the
//! last page, a "next" link in its pager.

use crate::crawler::parser::{element_text, required_attr, required_element, selector, ParseError};
use crate::record::ListingItem;
use crate::url::resolve_href;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const PRODUCT_SELECTOR: &str = "article.product_pod";
const LINK_SELECTOR: &str = "h3 a";
const PRICE_SELECTOR: &str = ".price_color";
const RATING_SELECTOR: &str = "p";
const NEXT_PAGE_SELECTOR: &str = "li.next a";

/// Everything extracted from one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Product summaries in page order
    pub items: Vec<ListingItem>,

    /// Absolute URL of the next listing page, `None` on the last page
    pub next_page: Option<Url>,
}

/// Parses a listing page
///
/// # Extraction Rules
///
/// | Field | Source | Required |
/// |-------|--------|----------|
/// | name | `title` of `h3 a`, trimmed | yes |
/// | price | text of `.price_color`, trimmed | yes |
/// | rating | second class token of the first `p` | no |
/// | url | `href` of `h3 a`, joined onto `base_url` | yes |
/// | next page | `href` of `li.next a`, joined onto `page_url` | no |
///
/// # Arguments
///
/// * `html` - The listing page markup
/// * `base_url` - The configured catalog root; product links resolve against it
/// * `page_url` - The URL this page was fetched from; the pager link resolves against it
///
/// # Returns
///
/// * `Ok(ListingPage)` - Items and next-page link
/// * `Err(ParseError)` - A product lacks a required field
///
/// # Example
///
/// ```
/// use catalog_harvester::crawler::parse_listing;
/// use url::Url;
///
/// let html = r#"<article class="product_pod">
///     <p class="star-rating Two"></p>
///     <h3><a href="book_1/index.html" title="Tipping the Velvet">Tipping...</a></h3>
///     <p class="price_color">£53.74</p>
/// </article>"#;
/// let base = Url::parse("https://books.toscrape.com/").unwrap();
/// let page = parse_listing(html, &base, &base).unwrap();
/// assert_eq!(page.items[0].name, "Tipping the Velvet");
/// assert_eq!(page.items[0].url.as_str(), "https://books.toscrape.com/book_1/index.html");
/// assert_eq!(page.items[0].rating.as_deref(), Some("Two"));
/// assert!(page.next_page.is_none());
/// ```
pub fn parse_listing(
    html: &str,
    base_url: &Url,
    page_url: &Url,
) -> Result<ListingPage, ParseError> {
    let document = Html::parse_document(html);

    let product_selector = selector(PRODUCT_SELECTOR)?;
    let link_selector = selector(LINK_SELECTOR)?;
    let price_selector = selector(PRICE_SELECTOR)?;
    let rating_selector = selector(RATING_SELECTOR)?;

    let mut items = Vec::new();
    for product in document.select(&product_selector) {
        let link = required_element(&product, &link_selector, "name", LINK_SELECTOR)?;

        let name = required_attr(&link, "title", "name")?.trim().to_string();
        let href = required_attr(&link, "href", "url")?;
        let url = resolve_href(base_url, href)
            .map_err(|source| ParseError::InvalidUrl { field: "url", source })?;

        let price = element_text(&required_element(
            &product,
            &price_selector,
            "price",
            PRICE_SELECTOR,
        )?);

        let rating = extract_rating(&product, &rating_selector);

        items.push(ListingItem {
            name,
            price,
            rating,
            url,
        });
    }

    let next_page = extract_next_page(&document, page_url)?;

    tracing::debug!(
        "Parsed listing page {}: {} items, next page {:?}",
        page_url,
        items.len(),
        next_page.as_ref().map(Url::as_str)
    );

    Ok(ListingPage { items, next_page })
}

/// Reads the star rating from the second class token of the first `<p>`
///
/// No `<p>`, no `class` attribute, and a single-token class all give `None`.
fn extract_rating(product: &ElementRef<'_>, rating_selector: &Selector) -> Option<String> {
    product
        .select(rating_selector)
        .next()
        .and_then(|p| p.value().attr("class"))
        .and_then(|class| class.split_whitespace().nth(1))
        .map(str::to_string)
}

/// Finds the pager's "next" link
///
/// An unresolvable link is logged and treated as the end of the catalog.
fn extract_next_page(document: &Html, page_url: &Url) -> Result<Option<Url>, ParseError> {
    let next_selector = selector(NEXT_PAGE_SELECTOR)?;

    let href = match document
        .select(&next_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
    {
        Some(href) => href,
        None => return Ok(None),
    };

    match resolve_href(page_url, href) {
        Ok(url) => Ok(Some(url)),
        Err(e) => {
            tracing::warn!("Ignoring unusable next page link '{}': {}", href, e);
            Ok(None)
        }
    }
}
