//! Product detail page parser
//!
//! Every field on the detail page is supplementary: anything missing is
//! simply left out of the record.

use crate::crawler::parser::{element_text, selector, ParseError};
use crate::record::DetailFields;
use crate::url::resolve_href;
use scraper::Html;
use url::Url;

const BREADCRUMB_SELECTOR: &str = "ul.breadcrumb li a";
const IMAGE_SELECTOR: &str = "div.item.active img";
const INFO_TABLE_SELECTOR: &str = "table.table.table-striped";
const ROW_SELECTOR: &str = "tr";
const HEADER_CELL_SELECTOR: &str = "th";
const DATA_CELL_SELECTOR: &str = "td";

/// Header text of the info table row holding the product code
const UPC_HEADER: &str = "UPC";

/// Parses a product detail page
///
/// - category: text of the last breadcrumb link
/// - image URL: `src` of the active carousel image, joined onto `base_url`
/// - UPC: data cell of the first info-table row headed exactly `UPC`
///
/// Only an invalid built-in selector can make this fail; absent elements
/// yield `None` fields.
///
/// # Example
///
/// ```
/// use catalog_harvester::crawler::parse_detail;
/// use url::Url;
///
/// let base = Url::parse("https://books.toscrape.com/").unwrap();
/// let detail = parse_detail("<html><body></body></html>", &base).unwrap();
/// assert!(detail.is_empty());
/// ```
pub fn parse_detail(html: &str, base_url: &Url) -> Result<DetailFields, ParseError> {
    let document = Html::parse_document(html);

    Ok(DetailFields {
        category: extract_category(&document)?,
        image_url: extract_image_url(&document, base_url)?,
        upc: extract_upc(&document)?,
    })
}

fn extract_category(document: &Html) -> Result<Option<String>, ParseError> {
    let breadcrumb_selector = selector(BREADCRUMB_SELECTOR)?;

    Ok(document
        .select(&breadcrumb_selector)
        .last()
        .map(|a| element_text(&a)))
}

fn extract_image_url(document: &Html, base_url: &Url) -> Result<Option<Url>, ParseError> {
    let image_selector = selector(IMAGE_SELECTOR)?;

    let src = match document
        .select(&image_selector)
        .next()
        .and_then(|img| img.value().attr("src"))
    {
        Some(src) => src,
        None => return Ok(None),
    };

    match resolve_href(base_url, src) {
        Ok(url) => Ok(Some(url)),
        Err(e) => {
            tracing::debug!("Ignoring unusable image source '{}': {}", src, e);
            Ok(None)
        }
    }
}

fn extract_upc(document: &Html) -> Result<Option<String>, ParseError> {
    let table_selector = selector(INFO_TABLE_SELECTOR)?;
    let row_selector = selector(ROW_SELECTOR)?;
    let header_selector = selector(HEADER_CELL_SELECTOR)?;
    let data_selector = selector(DATA_CELL_SELECTOR)?;

    let table = match document.select(&table_selector).next() {
        Some(table) => table,
        None => return Ok(None),
    };

    for row in table.select(&row_selector) {
        let header = match row.select(&header_selector).next() {
            Some(th) => element_text(&th),
            None => continue,
        };

        if header == UPC_HEADER {
            return Ok(row.select(&data_selector).next().map(|td| element_text(&td)));
        }
    }

    Ok(None)
}
