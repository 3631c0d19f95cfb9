use crate::record::fields::{as_text, empty_as_none, timestamp};
use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use url::Url;

/// Format of the `scraped_at` column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Dataset column names, in output order
pub const COLUMNS: [&str; 8] = [
    "name",
    "price",
    "rating",
    "category",
    "image_url",
    "upc",
    "url",
    "scraped_at",
];

/// Summary fields for one product, as found on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingItem {
    /// Product name (from the link's `title` attribute)
    pub name: String,

    /// Price as displayed, currency symbol included
    pub price: String,

    /// Star rating token such as `Three`
    pub rating: Option<String>,

    /// Absolute URL of the product's detail page
    pub url: Url,
}

/// Supplementary fields found on a product's detail page
///
/// The default value (everything absent) is what a record gets when the
/// detail page could not be fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    /// Leaf category from the breadcrumb trail
    pub category: Option<String>,

    /// Absolute URL of the main product image
    pub image_url: Option<Url>,

    /// Universal Product Code
    pub upc: Option<String>,
}

impl DetailFields {
    /// Returns true if no supplementary field was found
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.image_url.is_none() && self.upc.is_none()
    }
}

/// One harvested product, one row of the output dataset
///
/// Optional fields serialize as empty strings so that every row has the
/// same columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,

    pub price: String,

    #[serde(with = "empty_as_none")]
    pub rating: Option<String>,

    #[serde(with = "empty_as_none")]
    pub category: Option<String>,

    #[serde(with = "empty_as_none")]
    pub image_url: Option<Url>,

    #[serde(with = "empty_as_none")]
    pub upc: Option<String>,

    #[serde(with = "as_text")]
    pub url: Url,

    #[serde(with = "timestamp")]
    pub scraped_at: NaiveDateTime,
}

impl ProductRecord {
    /// Combines listing and detail fields into a finished record
    pub fn assemble(item: ListingItem, detail: DetailFields, scraped_at: NaiveDateTime) -> Self {
        Self {
            name: item.name,
            price: item.price,
            rating: item.rating,
            category: detail.category,
            image_url: detail.image_url,
            upc: detail.upc,
            url: item.url,
            scraped_at,
        }
    }

    /// Returns the record as table cells in `COLUMNS` order
    pub fn to_row(&self) -> [String; 8] {
        [
            self.name.clone(),
            self.price.clone(),
            self.rating.clone().unwrap_or_default(),
            self.category.clone().unwrap_or_default(),
            self.image_url
                .as_ref()
                .map(Url::to_string)
                .unwrap_or_default(),
            self.upc.clone().unwrap_or_default(),
            self.url.to_string(),
            self.scraped_at.format(TIMESTAMP_FORMAT).to_string(),
        ]
    }
}

/// Current local time truncated to whole seconds
pub fn timestamp_now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}
