//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use crate::CSV_SHEET_NAME;
use scrambler_core::{CellValue, Worksheet};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read CSV file into a worksheet
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a worksheet.
    ///
    /// Every record, the header included, becomes one sheet row. Records may
    /// have differing field counts. Fields are kept as text; empty fields leave
    /// their cell empty.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut worksheet = Worksheet::new(CSV_SHEET_NAME);

        for (row_idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            let row = u32::try_from(row_idx).unwrap_or(u32::MAX);

            for (col, field) in record.iter().enumerate() {
                let col = u16::try_from(col).unwrap_or(u16::MAX);
                let value = if field.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::string(field)
                };
                worksheet.set_cell_value_at(row, col, value)?;
            }
        }

        Ok(worksheet)
    }
}
