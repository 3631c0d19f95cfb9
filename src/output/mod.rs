//! Output module for saving harvested datasets
//!
//! This module handles:
//! - Writing records as CSV or Excel tables
//! - Resolving the format token chosen by the user
//! - Harvest statistics and the console listing

mod csv_output;
mod excel_output;
pub mod stats;
mod traits;

pub use csv_output::{read_csv_records, CsvSink};
pub use excel_output::ExcelSink;
pub use stats::{format_record_lines, print_records, print_statistics, HarvestStatistics};
pub use traits::{DatasetSink, OutputError, OutputFormat, OutputResult};

use crate::record::ProductRecord;
use std::path::PathBuf;

/// Saves records under `filename` in the format named by `format_token`
///
/// The extension is appended to `filename`. An unsupported token is
/// logged and nothing is written.
///
/// # Arguments
///
/// * `records` - The records to save
/// * `filename` - Output path without extension
/// * `format_token` - `csv` or `excel`
///
/// # Returns
///
/// * `Ok(Some(PathBuf))` - The file that was written
/// * `Ok(None)` - Unsupported format, nothing written
/// * `Err(OutputError)` - Writing failed
pub fn save_dataset(
    records: &[ProductRecord],
    filename: &str,
    format_token: &str,
) -> OutputResult<Option<PathBuf>> {
    let format = match OutputFormat::from_token(format_token) {
        Some(format) => format,
        None => {
            tracing::error!("Unsupported file type: {}", format_token);
            return Ok(None);
        }
    };

    let path = PathBuf::from(format!("{}.{}", filename, format.extension()));
    format.sink().write_records(records, &path)?;

    tracing::info!("Data saved to {}", path.display());
    Ok(Some(path))
}
