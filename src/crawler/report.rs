//! Outcome of one harvest run

use crate::crawler::ParseError;
use crate::record::ProductRecord;
use crate::HarvestError;
use std::fmt;

/// Why the crawl loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// `max-products` records were collected
    ItemCapReached,

    /// The last listing page had no "next" link
    LastPage,

    /// A listing page could not be fetched
    ListingUnavailable { url: String },

    /// A listing page lacked a required field
    StructuralFailure { url: String, error: ParseError },
}

impl StopReason {
    /// Returns true if the crawl ended because of a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::ListingUnavailable { .. } | Self::StructuralFailure { .. }
        )
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemCapReached => write!(f, "item limit reached"),
            Self::LastPage => write!(f, "no more listing pages"),
            Self::ListingUnavailable { url } => write!(f, "listing page {} unavailable", url),
            Self::StructuralFailure { url, error } => {
                write!(f, "listing page {} could not be parsed: {}", url, error)
            }
        }
    }
}

/// Records collected by a run plus how the run went
///
/// Partial results are always kept, whatever the stop reason.
#[derive(Debug, Clone)]
pub struct HarvestReport {
    /// Harvested records, in crawl order
    pub records: Vec<ProductRecord>,

    /// Listing pages successfully fetched
    pub pages_visited: usize,

    /// Records whose detail page could not be fetched or read
    pub detail_failures: usize,

    /// Why the crawl ended
    pub stop_reason: StopReason,
}

impl HarvestReport {
    /// Number of harvested records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing was harvested
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Turns a structural failure into an error, discarding partial records
    ///
    /// Every other stop reason yields the records.
    pub fn into_result(self) -> Result<Vec<ProductRecord>, HarvestError> {
        match self.stop_reason {
            StopReason::StructuralFailure { url, error } => {
                Err(HarvestError::StructuralParse { url, source: error })
            }
            _ => Ok(self.records),
        }
    }
}
