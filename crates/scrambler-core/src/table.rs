//! Header-keyed view of a worksheet
//!
//! A [`Table`] treats the first non-empty row of a sheet as the header and
//! every row below it, down to the last used row, as data. Each header cell
//! names one [`Column`]; missing cells stay as [`CellValue::Empty`] so a
//! column always has one entry per data row.

use crate::cell::CellValue;
use crate::error::{Error, Result};
use crate::worksheet::Worksheet;

/// A named, ordered list of cell values
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<CellValue>,
}

impl Column {
    /// Create a column from a header and its values
    pub fn new<S: Into<String>>(name: S, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Header text
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values top to bottom, one per data row
    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the column has no data rows
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered set of named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from columns
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Build a table from a worksheet.
    ///
    /// Header cells are coerced to text without trimming. A header cell with
    /// no text yields a column named `Unnamed: <n>`, `n` counted from the
    /// leftmost used column.
    pub fn from_worksheet(sheet: &Worksheet) -> Self {
        let Some((max_row, _)) = sheet.dimensions() else {
            return Self::default();
        };
        let Some(first_col) = sheet.iter_cells().map(|(_, col, _)| col).min() else {
            return Self::default();
        };
        let last_col = sheet
            .iter_cells()
            .map(|(_, col, _)| col)
            .max()
            .unwrap_or(first_col);
        let header_row = sheet
            .iter_cells()
            .next()
            .map(|(row, _, _)| row)
            .unwrap_or(0);

        let row_count = (max_row - header_row) as usize;
        let width = (last_col - first_col) as usize + 1;

        let mut columns: Vec<Column> = (0..width)
            .map(|i| {
                let header = sheet.get_value_at(header_row, first_col + i as u16);
                let name = header
                    .to_text()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| format!("Unnamed: {}", i));
                Column::new(name, vec![CellValue::Empty; row_count])
            })
            .collect();

        for (row, col, value) in sheet.iter_cells() {
            if row <= header_row {
                continue;
            }
            let column = &mut columns[(col - first_col) as usize];
            column.values[(row - header_row - 1) as usize] = value.clone();
        }

        Self { columns }
    }

    /// All columns, left to right
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Header names, left to right
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Look up a column by exact header name. Duplicate headers resolve to
    /// the leftmost match.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| Error::ColumnNotFound {
                name: name.to_string(),
                available: self.column_names().into_iter().map(String::from).collect(),
            })
    }
}
