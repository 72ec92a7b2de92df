//! # scrambler-xlsx
//!
//! XLSX (Office Open XML) reader and writer for scrambler.
//!
//! Only cell values are handled. Styles, formulas, comments and the rest of
//! the format are skipped on read and never produced on write; formula cells
//! contribute their cached value.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
