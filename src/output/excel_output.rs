//! Excel (`.xlsx`) dataset writer

use crate::output::traits::{DatasetSink, OutputError, OutputResult};
use crate::record::{ProductRecord, COLUMNS};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Writes records to the first worksheet of a new workbook
pub struct ExcelSink;

impl DatasetSink for ExcelSink {
    fn write_records(&self, records: &[ProductRecord], path: &Path) -> OutputResult<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();

        for (col, name) in COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
        }

        for (index, record) in records.iter().enumerate() {
            let row = u32::try_from(index + 1)
                .map_err(|_| OutputError::Write("too many rows for a worksheet".to_string()))?;
            for (col, cell) in record.to_row().into_iter().enumerate() {
                worksheet.write_string(row, col as u16, cell)?;
            }
        }

        workbook.save(path)?;
        Ok(())
    }
}
