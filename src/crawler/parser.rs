//! Shared HTML extraction helpers and the structural parse error
//!
//! The listing and detail parsers both work on a `scraper::Html` document
//! queried with fixed CSS selectors. A missing optional element is not an
//! error. A missing required element is a `ParseError`.

use crate::UrlError;
use scraper::{ElementRef, Selector};
use thiserror::Error;

/// Structural parse failure: the markup lacks something a record needs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid selector '{0}'")]
    InvalidSelector(&'static str),

    #[error("missing {field}: no element matches '{selector}'")]
    MissingElement {
        field: &'static str,
        selector: &'static str,
    },

    #[error("missing {field}: element has no '{attribute}' attribute")]
    MissingAttribute {
        field: &'static str,
        attribute: &'static str,
    },

    #[error("invalid {field} URL: {source}")]
    InvalidUrl {
        field: &'static str,
        source: UrlError,
    },
}

/// Compiles one of the parsers' fixed selectors
pub(crate) fn selector(css: &'static str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|_| ParseError::InvalidSelector(css))
}

/// Returns the element's text content with surrounding whitespace removed
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Returns the first descendant matching `selector`, or a `MissingElement` error
pub(crate) fn required_element<'a>(
    scope: &ElementRef<'a>,
    selector: &Selector,
    field: &'static str,
    css: &'static str,
) -> Result<ElementRef<'a>, ParseError> {
    scope
        .select(selector)
        .next()
        .ok_or(ParseError::MissingElement {
            field,
            selector: css,
        })
}

/// Returns an attribute value, or a `MissingAttribute` error
pub(crate) fn required_attr<'a>(
    element: &ElementRef<'a>,
    attribute: &'static str,
    field: &'static str,
) -> Result<&'a str, ParseError> {
    element
        .value()
        .attr(attribute)
        .ok_or(ParseError::MissingAttribute { field, attribute })
}
