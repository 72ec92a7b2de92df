//! Format dispatch for reading and writing sheets

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Error, Result};
use scrambler_core::{Workbook, Worksheet};
use scrambler_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
use scrambler_xlsx::{XlsxReader, XlsxWriter};

/// Tabular file formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    /// Office Open XML workbook (`.xlsx`, and `.xlsm` for reading)
    Xlsx,
    /// Comma-separated values (`.csv`)
    Csv,
}

impl SpreadsheetFormat {
    fn extension(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    /// Format used to read `path`
    pub fn for_reading(path: &Path) -> Option<Self> {
        match Self::extension(path).as_deref() {
            Some("xlsx") | Some("xlsm") => Some(SpreadsheetFormat::Xlsx),
            Some("csv") => Some(SpreadsheetFormat::Csv),
            _ => None,
        }
    }

    /// Format used to write `path`. Macro-enabled workbooks are read-only.
    pub fn for_writing(path: &Path) -> Option<Self> {
        match Self::extension(path).as_deref() {
            Some("xlsx") => Some(SpreadsheetFormat::Xlsx),
            Some("csv") => Some(SpreadsheetFormat::Csv),
            _ => None,
        }
    }
}

/// Open a workbook, picking the reader from the file extension.
///
/// The file is opened before the extension is checked, so a missing file is
/// always reported as [`Error::SourceNotFound`].
pub fn open_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::SourceNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let format = SpreadsheetFormat::for_reading(path).ok_or_else(|| Error::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let reader = BufReader::new(file);

    match format {
        SpreadsheetFormat::Xlsx => XlsxReader::read(reader).map_err(|e| Error::malformed(path, e)),
        SpreadsheetFormat::Csv => {
            let worksheet = CsvReader::read(reader, &CsvReadOptions::default())
                .map_err(|e| Error::malformed(path, e))?;
            let mut workbook = Workbook::empty();
            workbook
                .add_existing_worksheet(worksheet)
                .map_err(|e| Error::malformed(path, e))?;
            Ok(workbook)
        }
    }
}

/// Save a single worksheet, picking the writer from the file extension.
/// Creates or truncates the file.
pub fn save_worksheet<P: AsRef<Path>>(worksheet: Worksheet, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = SpreadsheetFormat::for_writing(path).ok_or_else(|| Error::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    match format {
        SpreadsheetFormat::Xlsx => {
            let mut workbook = Workbook::empty();
            workbook
                .add_existing_worksheet(worksheet)
                .map_err(|e| Error::write(path, e))?;
            XlsxWriter::write_file(&workbook, path).map_err(|e| Error::write(path, e))
        }
        SpreadsheetFormat::Csv => {
            CsvWriter::write_file(&worksheet, path, &CsvWriteOptions::default())
                .map_err(|e| Error::write(path, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        let read = |p: &str| SpreadsheetFormat::for_reading(Path::new(p));
        assert_eq!(read("words.xlsx"), Some(SpreadsheetFormat::Xlsx));
        assert_eq!(read("WORDS.XLSM"), Some(SpreadsheetFormat::Xlsx));
        assert_eq!(read("words.csv"), Some(SpreadsheetFormat::Csv));
        assert_eq!(read("words.xls"), None);
        assert_eq!(read("words"), None);

        let write = |p: &str| SpreadsheetFormat::for_writing(Path::new(p));
        assert_eq!(write("out.xlsx"), Some(SpreadsheetFormat::Xlsx));
        assert_eq!(write("out.xlsm"), None);
    }

    #[test]
    fn test_open_missing_file() {
        let err = open_workbook("/definitely/not/here.xlsx").unwrap_err();
        assert!(matches!(err, Error::SourceNotFound { .. }));
    }

    #[test]
    fn test_open_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "Words\ncat\n").unwrap();

        let err = open_workbook(&path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_open_garbage_xlsx() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.xlsx");
        std::fs::write(&path, "this is not a zip archive").unwrap();

        match open_workbook(&path).unwrap_err() {
            Error::MalformedSource { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected MalformedSource, got {:?}", other),
        }
    }

    #[test]
    fn test_save_unsupported_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("groups.ods");

        let err = save_worksheet(Worksheet::new("Sheet1"), &path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("groups.xlsx");

        let err = save_worksheet(Worksheet::new("Sheet1"), &path).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }
}
