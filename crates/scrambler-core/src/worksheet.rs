//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellValue};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A single sheet of cells.
///
/// Storage is sparse and ordered row-major, so iteration yields cells the
/// way they appear in the file. Empty values are never stored.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    name: String,
    cells: BTreeMap<(u32, u16), CellValue>,
}

impl Worksheet {
    /// Create a new empty worksheet
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Get the worksheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the value at an A1 address
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get the value at a 0-based position (Empty if unset)
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells.get(&(row, col)).cloned().unwrap_or_default()
    }

    /// Set the value at an A1 address
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set the value at a 0-based position. Setting `Empty` clears the cell.
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }

        let value = value.into();
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
        Ok(())
    }

    /// Number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check whether the sheet holds no values
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Highest used row and column (0-based), or `None` for an empty sheet
    pub fn dimensions(&self) -> Option<(u32, u16)> {
        let max_row = self.cells.keys().next_back()?.0;
        let max_col = self.cells.keys().map(|(_, c)| *c).max()?;
        Some((max_row, max_col))
    }

    /// Iterate over non-empty cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellValue)> {
        self.cells.iter().map(|(&(row, col), value)| (row, col, value))
    }

    /// Iterate over non-empty cells of one row, left to right
    pub fn row_cells(&self, row: u32) -> impl Iterator<Item = (u16, &CellValue)> {
        self.cells
            .range((row, 0)..=(row, MAX_COLS - 1))
            .map(|(&(_, col), value)| (col, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_and_get() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell_value("B2", "cat").unwrap();
        sheet.set_cell_value_at(0, 0, 1.5).unwrap();

        assert_eq!(sheet.get_value("B2").unwrap(), CellValue::string("cat"));
        assert_eq!(sheet.get_value_at(0, 0), CellValue::Number(1.5));
        assert_eq!(sheet.get_value_at(5, 5), CellValue::Empty);
        assert_eq!(sheet.cell_count(), 2);
    }

    #[test]
    fn test_empty_value_clears() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell_value("A1", "x").unwrap();
        sheet.set_cell_value("A1", CellValue::Empty).unwrap();
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_dimensions() {
        let mut sheet = Worksheet::new("Sheet1");
        assert_eq!(sheet.dimensions(), None);

        sheet.set_cell_value("C1", "a").unwrap();
        sheet.set_cell_value("A4", "b").unwrap();
        assert_eq!(sheet.dimensions(), Some((3, 2)));
    }

    #[test]
    fn test_iteration_is_row_major() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell_value("B2", "d").unwrap();
        sheet.set_cell_value("A2", "c").unwrap();
        sheet.set_cell_value("B1", "b").unwrap();
        sheet.set_cell_value("A1", "a").unwrap();

        let order: Vec<String> = sheet.iter_cells().map(|(_, _, v)| v.to_string()).collect();
        assert_eq!(order, vec!["a", "b", "c", "d"]);

        let row: Vec<u16> = sheet.row_cells(1).map(|(col, _)| col).collect();
        assert_eq!(row, vec![0, 1]);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut sheet = Worksheet::new("Sheet1");
        assert!(sheet.set_cell_value_at(MAX_ROWS, 0, "x").is_err());
        assert!(sheet.set_cell_value_at(0, MAX_COLS, "x").is_err());
    }
}
