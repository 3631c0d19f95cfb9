//! Dataset sink traits and types
//!
//! This module defines the trait interface for dataset writers and the
//! set of supported output formats.

use crate::output::{CsvSink, ExcelSink};
use crate::record::ProductRecord;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Supported dataset formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Comma-separated values, `.csv`
    Csv,
    /// Excel workbook, `.xlsx`
    Excel,
}

impl OutputFormat {
    /// Parses a format token (`csv` or `excel`, case-insensitive)
    ///
    /// Returns None for any other token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "excel" => Some(Self::Excel),
            _ => None,
        }
    }

    /// The token naming this format
    pub fn token(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "excel",
        }
    }

    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "xlsx",
        }
    }

    /// Returns the writer for this format
    pub fn sink(&self) -> Box<dyn DatasetSink> {
        match self {
            Self::Csv => Box::new(CsvSink),
            Self::Excel => Box::new(ExcelSink),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Trait for dataset writers
///
/// A sink writes one rectangular table: a header row with the record
/// columns, then one row per record, no index column.
pub trait DatasetSink {
    /// Writes `records` to `path`, replacing any existing file
    ///
    /// # Arguments
    ///
    /// * `records` - The records to write, in order
    /// * `path` - Destination file
    fn write_records(&self, records: &[ProductRecord], path: &Path) -> OutputResult<()>;
}
