//! Loader options

use std::fmt;
use std::num::NonZeroUsize;

use crate::error::{Error, Result};

/// Sheet read when none is specified
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Header of the word column when none is specified
pub const DEFAULT_WORD_COLUMN: &str = "Words";

/// Words per group when none is specified
pub const DEFAULT_GROUP_SIZE: usize = 8;

/// Largest group size; the output sheet needs one column per slot plus the
/// label column
pub const MAX_GROUP_SIZE: usize = scrambler_core::MAX_COLS as usize - 1;

/// Which sheet of a workbook to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSelector {
    /// Exact sheet name
    Name(String),
    /// 0-based position in tab order
    Index(usize),
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::Name(DEFAULT_SHEET_NAME.to_string())
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetSelector::Name(name) => write!(f, "{}", name),
            SheetSelector::Index(index) => write!(f, "#{}", index),
        }
    }
}

impl From<&str> for SheetSelector {
    fn from(name: &str) -> Self {
        SheetSelector::Name(name.to_string())
    }
}

impl From<usize> for SheetSelector {
    fn from(index: usize) -> Self {
        SheetSelector::Index(index)
    }
}

/// A validated, strictly positive group size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSize(NonZeroUsize);

impl GroupSize {
    /// Validate a raw group size. Zero, negative values and sizes above
    /// [`MAX_GROUP_SIZE`] are rejected.
    pub fn new(size: i64) -> Result<Self> {
        let size = usize::try_from(size)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| {
                Error::InvalidConfiguration(format!(
                    "group size must be a positive integer, got {}",
                    size
                ))
            })?;
        if size.get() > MAX_GROUP_SIZE {
            return Err(Error::InvalidConfiguration(format!(
                "group size must be at most {}, got {}",
                MAX_GROUP_SIZE, size
            )));
        }
        Ok(GroupSize(size))
    }

    /// The size as a plain integer
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for GroupSize {
    fn default() -> Self {
        GroupSize(NonZeroUsize::MIN.saturating_add(DEFAULT_GROUP_SIZE - 1))
    }
}

impl From<NonZeroUsize> for GroupSize {
    fn from(size: NonZeroUsize) -> Self {
        GroupSize(size)
    }
}

impl fmt::Display for GroupSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Options for [`group_words`](crate::group_words)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOptions {
    /// Sheet holding the words (default: `Sheet1`)
    pub sheet: SheetSelector,
    /// Header of the word column (default: `Words`)
    pub column: String,
    /// Words per group (default: 8). Kept signed so that out-of-range input
    /// reaches validation instead of being rejected while parsing.
    pub group_size: i64,
}

impl GroupOptions {
    /// Validated group size
    pub fn group_size(&self) -> Result<GroupSize> {
        GroupSize::new(self.group_size)
    }
}

impl Default for GroupOptions {
    fn default() -> Self {
        Self {
            sheet: SheetSelector::default(),
            column: DEFAULT_WORD_COLUMN.to_string(),
            group_size: DEFAULT_GROUP_SIZE as i64,
        }
    }
}
