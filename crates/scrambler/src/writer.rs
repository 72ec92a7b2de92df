//! Writing groups to a spreadsheet

use std::fmt::Display;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use tracing::info;

use crate::error::{Error, Result};
use crate::grouping::GroupCollection;
use crate::io::save_worksheet;
use scrambler_core::Worksheet;

/// Header of the label column
pub const GROUP_HEADER: &str = "Group";

/// Name of the single sheet in the output workbook
pub const OUTPUT_SHEET_NAME: &str = "Sheet1";

const DEFAULT_OUTPUT_PREFIX: &str = "word_groups_";
const DEFAULT_OUTPUT_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

/// Timestamped file name used when no destination is given, e.g.
/// `word_groups_20240131_094500.xlsx`. Relative to the working directory.
pub fn default_output_path<Tz>(now: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    PathBuf::from(format!(
        "{}{}.xlsx",
        DEFAULT_OUTPUT_PREFIX,
        now.format(DEFAULT_OUTPUT_TIMESTAMP)
    ))
}

/// Lay the groups out as a sheet.
///
/// Row 1 is `Group, Word 1 .. Word N` for the collection's group size, even
/// when there are no groups. Each group then gets one row labelled
/// `Group i`; absent slots leave their cell unset.
pub fn groups_to_worksheet(groups: &GroupCollection) -> scrambler_core::Result<Worksheet> {
    let mut sheet = Worksheet::new(OUTPUT_SHEET_NAME);

    sheet.set_cell_value_at(0, 0, GROUP_HEADER)?;
    for slot in 1..=groups.group_size().get() {
        sheet.set_cell_value_at(0, column_index(slot)?, format!("Word {}", slot))?;
    }

    for (i, group) in groups.iter().enumerate() {
        let row = row_index(i + 1)?;
        sheet.set_cell_value_at(row, 0, format!("Group {}", i + 1))?;
        for (j, slot) in group.slots().iter().enumerate() {
            if let Some(word) = slot.as_word() {
                sheet.set_cell_value_at(row, column_index(j + 1)?, word.as_str())?;
            }
        }
    }

    Ok(sheet)
}

fn column_index(index: usize) -> scrambler_core::Result<u16> {
    u16::try_from(index).map_err(|_| {
        scrambler_core::Error::ColumnOutOfBounds(u16::MAX, scrambler_core::MAX_COLS - 1)
    })
}

fn row_index(index: usize) -> scrambler_core::Result<u32> {
    u32::try_from(index)
        .map_err(|_| scrambler_core::Error::RowOutOfBounds(u32::MAX, scrambler_core::MAX_ROWS - 1))
}

/// Write the groups, naming the file from the local clock if `destination`
/// is `None`. Returns the path written.
pub fn write_groups(groups: &GroupCollection, destination: Option<&Path>) -> Result<PathBuf> {
    write_groups_at(groups, destination, &Local::now())
}

/// Like [`write_groups`], with the default file name taken from `now`
pub fn write_groups_at<Tz>(
    groups: &GroupCollection,
    destination: Option<&Path>,
    now: &DateTime<Tz>,
) -> Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let path = match destination {
        Some(path) => path.to_path_buf(),
        None => default_output_path(now),
    };

    let sheet = groups_to_worksheet(groups).map_err(|e| Error::write(&path, e))?;
    save_worksheet(sheet, &path)?;

    info!(
        path = %path.display(),
        groups = groups.len(),
        "saved word groups"
    );
    Ok(path)
}
