//! # scrambler
//!
//! Reads a column of words from a spreadsheet, shuffles them, splits them
//! into fixed-size groups and writes the groups back out as a spreadsheet.
//!
//! ## Example
//!
//! ```rust,no_run
//! use scrambler::prelude::*;
//!
//! let options = GroupOptions {
//!     group_size: 4,
//!     ..Default::default()
//! };
//! let groups = group_words("words.xlsx", &options)?;
//! for (i, group) in groups.iter().enumerate() {
//!     let words: Vec<&str> = group.words().map(Word::as_str).collect();
//!     println!("Group {}: {}", i + 1, words.join(", "));
//! }
//! let path = write_groups(&groups, None)?;
//! println!("saved to {}", path.display());
//! # Ok::<(), scrambler::Error>(())
//! ```

pub mod error;
pub mod grouping;
pub mod io;
pub mod loader;
pub mod options;
pub mod prelude;
pub mod writer;

pub use error::{Error, Result};
pub use grouping::{chunk_words, shuffle_words, Group, GroupCollection, Slot, Word};
pub use io::{open_workbook, save_worksheet, SpreadsheetFormat};
pub use loader::{extract_words, group_words, group_words_with_rng, load_word_list};
pub use options::{
    GroupOptions, GroupSize, SheetSelector, DEFAULT_GROUP_SIZE, DEFAULT_SHEET_NAME,
    DEFAULT_WORD_COLUMN, MAX_GROUP_SIZE,
};
pub use writer::{
    default_output_path, groups_to_worksheet, write_groups, write_groups_at, GROUP_HEADER,
    OUTPUT_SHEET_NAME,
};

// Re-export the underlying sheet types and codecs
pub use scrambler_core::{CellAddress, CellValue, Column, Table, Workbook, Worksheet};
pub use scrambler_csv::{CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
pub use scrambler_xlsx::{XlsxError, XlsxReader, XlsxWriter};
