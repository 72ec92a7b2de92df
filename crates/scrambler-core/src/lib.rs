//! # scrambler-core
//!
//! Core data structures shared by the scrambler crates.
//!
//! - [`CellValue`] - Raw cell contents (numbers, strings, booleans, errors)
//! - [`CellAddress`] - A1-style cell addressing
//! - [`Workbook`], [`Worksheet`] - Sparse sheet storage filled by the readers
//! - [`Table`], [`Column`] - Header-keyed view of a worksheet
//!
//! ## Example
//!
//! ```rust
//! use scrambler_core::{Table, Worksheet};
//!
//! let mut sheet = Worksheet::new("Sheet1");
//! sheet.set_cell_value("A1", "Words").unwrap();
//! sheet.set_cell_value("A2", "cat").unwrap();
//! sheet.set_cell_value("A3", 42.0).unwrap();
//!
//! let table = Table::from_worksheet(&sheet);
//! let column = table.column("Words").unwrap();
//! assert_eq!(column.len(), 2);
//! ```

pub mod cell;
pub mod error;
pub mod table;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellValue};
pub use error::{Error, Result};
pub use table::{Column, Table};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
