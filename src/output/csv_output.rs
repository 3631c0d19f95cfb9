//! CSV dataset writer

use crate::output::traits::{DatasetSink, OutputResult};
use crate::record::{ProductRecord, COLUMNS};
use std::path::Path;

/// Writes records as CSV with a header row
pub struct CsvSink;

impl DatasetSink for CsvSink {
    fn write_records(&self, records: &[ProductRecord], path: &Path) -> OutputResult<()> {
        // The header is written by hand so an empty dataset still has one.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;

        writer.write_record(COLUMNS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        Ok(())
    }
}

/// Reads a dataset previously written by `CsvSink`
pub fn read_csv_records(path: &Path) -> OutputResult<Vec<ProductRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize::<ProductRecord>() {
        records.push(row?);
    }
    Ok(records)
}
