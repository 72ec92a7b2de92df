//! # scrambler-csv
//!
//! CSV reader and writer for scrambler. A CSV file maps to a single
//! worksheet named `Sheet1`.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;

/// Name given to the worksheet read from a CSV file
pub const CSV_SHEET_NAME: &str = "Sheet1";
