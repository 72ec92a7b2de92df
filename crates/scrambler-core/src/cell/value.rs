//! Cell value types

use std::fmt;

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Numeric value (all numbers stored as f64, including dates)
    Number(f64),

    /// String value
    String(String),

    /// Error literal as written in the file (#VALUE!, #N/A, etc.)
    Error(String),
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce the value to text.
    ///
    /// Returns `None` for values that count as missing: empty cells and
    /// error literals. Whole numbers lose their fractional part
    /// (`42.0` becomes `"42"`) and booleans render as `True` / `False`.
    /// The result is not trimmed.
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Empty | CellValue::Error(_) => None,
            CellValue::String(s) => Some(s.clone()),
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Boolean(b) => Some(if *b { "True" } else { "False" }.to_string()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::string(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_conversions() {
        assert_eq!(CellValue::from(42), CellValue::Number(42.0));
        assert_eq!(CellValue::from(3.5), CellValue::Number(3.5));
        assert_eq!(CellValue::from(true), CellValue::Boolean(true));
        assert_eq!(CellValue::from("hello").as_string(), Some("hello"));
    }

    #[test]
    fn test_to_text_numbers() {
        assert_eq!(CellValue::Number(42.0).to_text().as_deref(), Some("42"));
        assert_eq!(CellValue::Number(-7.0).to_text().as_deref(), Some("-7"));
        assert_eq!(CellValue::Number(3.5).to_text().as_deref(), Some("3.5"));
        assert_eq!(CellValue::Number(0.1).to_text().as_deref(), Some("0.1"));
    }

    #[test]
    fn test_to_text_booleans() {
        assert_eq!(CellValue::Boolean(true).to_text().as_deref(), Some("True"));
        assert_eq!(CellValue::Boolean(false).to_text().as_deref(), Some("False"));
    }

    #[test]
    fn test_to_text_missing() {
        assert_eq!(CellValue::Empty.to_text(), None);
        assert_eq!(CellValue::Error("#N/A".into()).to_text(), None);
    }

    #[test]
    fn test_to_text_keeps_whitespace() {
        assert_eq!(
            CellValue::string("  cat ").to_text().as_deref(),
            Some("  cat ")
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Boolean(true).to_string(), "TRUE");
        assert_eq!(CellValue::Number(8.0).to_string(), "8");
        assert_eq!(CellValue::Empty.to_string(), "");
    }
}
