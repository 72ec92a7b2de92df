//! Loading the word list and turning it into groups

use std::path::Path;

use rand::Rng;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::grouping::{chunk_words, shuffle_words, GroupCollection, Word};
use crate::io::open_workbook;
use crate::options::{GroupOptions, SheetSelector};
use scrambler_core::{CellValue, Column, Table, Workbook, Worksheet};

/// Load, shuffle and group the words of `path` using the thread-local RNG.
///
/// Fails with [`Error::InvalidConfiguration`] before touching the file if the
/// group size is not positive.
pub fn group_words<P: AsRef<Path>>(path: P, options: &GroupOptions) -> Result<GroupCollection> {
    group_words_with_rng(path, options, &mut rand::thread_rng())
}

/// Like [`group_words`], drawing the permutation from `rng`
pub fn group_words_with_rng<P, R>(
    path: P,
    options: &GroupOptions,
    rng: &mut R,
) -> Result<GroupCollection>
where
    P: AsRef<Path>,
    R: Rng + ?Sized,
{
    let group_size = options.group_size()?;
    let mut words = load_word_list(path.as_ref(), &options.sheet, &options.column)?;

    shuffle_words(&mut words, rng);
    let groups = chunk_words(words, group_size);

    info!(
        words = groups.word_count(),
        groups = groups.len(),
        group_size = group_size.get(),
        "grouped words"
    );
    Ok(groups)
}

/// Read the word list from one column of one sheet, in row order.
///
/// Missing cells and cells that are blank after trimming are skipped.
pub fn load_word_list<P: AsRef<Path>>(
    path: P,
    sheet: &SheetSelector,
    column: &str,
) -> Result<Vec<Word>> {
    let path = path.as_ref();
    let workbook = open_workbook(path)?;
    let worksheet = select_sheet(&workbook, sheet).ok_or_else(|| Error::SheetNotFound {
        path: path.to_path_buf(),
        sheet: sheet.to_string(),
        available: workbook.sheet_names().into_iter().map(String::from).collect(),
    })?;

    let table = Table::from_worksheet(worksheet);
    let column = table.column(column).map_err(|e| match e {
        scrambler_core::Error::ColumnNotFound { name, available } => Error::ColumnNotFound {
            column: name,
            available,
        },
        other => Error::malformed(path, other),
    })?;

    let words = extract_words(column);
    debug!(
        sheet = worksheet.name(),
        column = column.name(),
        rows = column.len(),
        words = words.len(),
        "loaded word list"
    );
    Ok(words)
}

fn select_sheet<'a>(workbook: &'a Workbook, sheet: &SheetSelector) -> Option<&'a Worksheet> {
    match sheet {
        SheetSelector::Name(name) => workbook.worksheet_by_name(name),
        SheetSelector::Index(index) => workbook.worksheet(*index),
    }
}

/// Coerce every value of `column` to a [`Word`], dropping missing and blank
/// entries
pub fn extract_words(column: &Column) -> Vec<Word> {
    column
        .values()
        .iter()
        .filter_map(CellValue::to_text)
        .filter_map(Word::new)
        .collect()
}
