//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use scrambler_core::{CellAddress, CellValue, Workbook, Worksheet};

/// Decode Excel's `_xHHHH_` escape sequences (`_x000d_` is CR, `_x005f_` an
/// underscore). Malformed sequences are kept as written.
fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("_x") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let decoded = tail
            .get(2..6)
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .filter(|_| tail.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &tail[7..];
            }
            None => {
                out.push_str("_x");
                rest = &tail[2..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Value of the attribute whose local name (prefix stripped) is `name`
fn attr(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// A `<c>` element whose children are still being read
struct PendingCell {
    row: u32,
    col: u16,
    cell_type: Option<String>,
    raw: String,
    has_value: bool,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let sheet_info = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let mut workbook = Workbook::empty();
        for (name, r_id) in &sheet_info {
            let Some(path) = sheet_paths.get(r_id) else {
                tracing::warn!("sheet '{name}' has no worksheet relationship ({r_id}), skipping");
                continue;
            };
            let mut worksheet = Worksheet::new(name.as_str());
            Self::read_worksheet(&mut archive, path, &mut worksheet, &shared_strings)?;
            tracing::debug!(
                "read sheet '{}' from {} ({} cells)",
                name,
                path,
                worksheet.cell_count()
            );
            workbook.add_existing_worksheet(worksheet)?;
        }

        Ok(workbook)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings),
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        // Runs are concatenated as written; whitespace at run edges is content
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut current = String::new();
        let mut in_si = false;
        let mut in_t = false;
        // Phonetic runs repeat the text as a reading guide
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Event::Empty(e) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current));
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Event::Text(e) if in_t => current.push_str(&e.unescape()?),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read workbook.xml to get sheet names and rIds, in tab order
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"sheet" => {
                    if let (Some(name), Some(r_id)) = (attr(&e, b"name"), attr(&e, b"id")) {
                        sheets.push((name, r_id));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to map rIds to worksheet part paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e)
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let id = attr(&e, b"Id");
                    let target = attr(&e, b"Target");
                    let rel_type = attr(&e, b"Type");
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Targets are relative to xl/ unless absolute
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read cell values of one worksheet part
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        shared_strings: &[String],
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(false);

        let mut buf = Vec::new();

        // `r` attributes are optional on rows and cells; positions then
        // continue from the previous element.
        let mut next_row: u32 = 0;
        let mut current_row: u32 = 0;
        let mut next_col: u16 = 0;

        let mut cell: Option<PendingCell> = None;
        let mut in_value = false;
        let mut in_inline = false;
        let mut in_text = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"row" => {
                        current_row = Self::row_index(&e, next_row);
                        next_row = current_row + 1;
                        next_col = 0;
                    }
                    b"c" => {
                        let (row, col) = Self::cell_position(&e, current_row, next_col)?;
                        next_col = col.saturating_add(1);
                        cell = Some(PendingCell {
                            row,
                            col,
                            cell_type: attr(&e, b"t"),
                            raw: String::new(),
                            has_value: false,
                        });
                    }
                    b"v" => {
                        if let Some(c) = cell.as_mut() {
                            c.has_value = true;
                            in_value = true;
                        }
                    }
                    b"is" => {
                        if let Some(c) = cell.as_mut() {
                            c.has_value = true;
                            in_inline = true;
                        }
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_inline && !in_phonetic => in_text = true,
                    _ => {}
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"row" => {
                        current_row = Self::row_index(&e, next_row);
                        next_row = current_row + 1;
                        next_col = 0;
                    }
                    b"c" => {
                        let (_, col) = Self::cell_position(&e, current_row, next_col)?;
                        next_col = col.saturating_add(1);
                    }
                    _ => {}
                },
                Event::Text(e) if in_value || in_text => {
                    if let Some(c) = cell.as_mut() {
                        c.raw.push_str(&e.unescape()?);
                    }
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"v" => in_value = false,
                    b"t" => in_text = false,
                    b"is" => in_inline = false,
                    b"rPh" => in_phonetic = false,
                    b"c" => {
                        if let Some(pending) = cell.take() {
                            if pending.has_value {
                                let value = Self::decode_cell(&pending, shared_strings)?;
                                worksheet.set_cell_value_at(pending.row, pending.col, value)?;
                            }
                        }
                        in_value = false;
                        in_inline = false;
                        in_text = false;
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// 0-based row index from a `<row>` element
    fn row_index(e: &BytesStart, fallback: u32) -> u32 {
        attr(e, b"r")
            .and_then(|r| r.parse::<u32>().ok())
            .map(|r| r.saturating_sub(1))
            .unwrap_or(fallback)
    }

    /// 0-based position of a `<c>` element
    fn cell_position(e: &BytesStart, row: u32, col: u16) -> XlsxResult<(u32, u16)> {
        match attr(e, b"r") {
            Some(cell_ref) => {
                let addr = CellAddress::parse(&cell_ref).map_err(|err| XlsxError::InvalidCell {
                    cell: cell_ref.clone(),
                    message: err.to_string(),
                })?;
                Ok((addr.row, addr.col))
            }
            None => Ok((row, col)),
        }
    }

    /// Turn the raw text of a cell into a value according to its `t` attribute
    fn decode_cell(cell: &PendingCell, shared_strings: &[String]) -> XlsxResult<CellValue> {
        let raw = cell.raw.as_str();
        let value = match cell.cell_type.as_deref() {
            Some("s") => {
                let index: usize = raw.trim().parse().map_err(|_| XlsxError::InvalidCell {
                    cell: CellAddress::new(cell.row, cell.col).to_a1_string(),
                    message: format!("invalid shared string index '{}'", raw),
                })?;
                let s = shared_strings
                    .get(index)
                    .ok_or(XlsxError::SharedStringOutOfRange {
                        index,
                        len: shared_strings.len(),
                    })?;
                CellValue::String(s.clone())
            }
            Some("b") => {
                let raw = raw.trim();
                CellValue::Boolean(raw == "1" || raw.eq_ignore_ascii_case("true"))
            }
            Some("e") => CellValue::Error(raw.trim().to_string()),
            Some("inlineStr") | Some("str") => CellValue::String(decode_excel_escapes(raw)),
            // ISO 8601 date cells
            Some("d") => CellValue::String(raw.to_string()),
            None | Some("n") => match raw.trim().parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::String(raw.to_string()),
            },
            Some(other) => {
                tracing::warn!(
                    "unknown cell type '{}' at {}, reading as text",
                    other,
                    CellAddress::new(cell.row, cell.col)
                );
                CellValue::String(raw.to_string())
            }
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};

    const CONTENT_TYPES: &str = r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;
    const WORKBOOK_RELS: &str = r#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="/xl/worksheets/sheet2.xml"/></Relationships>"#;
    const WORKBOOK: &str = r#"<?xml version="1.0"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/><sheet name="Lists" sheetId="2" r:id="rId2"/></sheets></workbook>"#;

    /// Build a two-sheet package; `sheet1` and the shared strings vary per test
    fn package(shared_strings: Option<&str>, sheet1: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options = zip::write::SimpleFileOptions::default();

            zip.start_file("[Content_Types].xml", options).unwrap();
            zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();
            zip.start_file("xl/workbook.xml", options).unwrap();
            zip.write_all(WORKBOOK.as_bytes()).unwrap();
            zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
            zip.write_all(WORKBOOK_RELS.as_bytes()).unwrap();
            if let Some(sst) = shared_strings {
                zip.start_file("xl/sharedStrings.xml", options).unwrap();
                zip.write_all(sst.as_bytes()).unwrap();
            }
            zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
            zip.write_all(sheet1.as_bytes()).unwrap();
            zip.start_file("xl/worksheets/sheet2.xml", options).unwrap();
            zip.write_all(br#"<worksheet><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>other</t></is></c></row></sheetData></worksheet>"#).unwrap();

            zip.finish().unwrap();
        }
        buf
    }

    #[test]
    fn test_decode_excel_escapes() {
        assert_eq!(decode_excel_escapes("hello_x000d_world"), "hello\rworld");
        assert_eq!(decode_excel_escapes("col1_x0009_col2"), "col1\tcol2");
        assert_eq!(decode_excel_escapes("under_x005f_score"), "under_score");
        assert_eq!(decode_excel_escapes("_x000A_"), "\n");
        assert_eq!(decode_excel_escapes("plain text"), "plain text");
    }

    #[test]
    fn test_decode_excel_escapes_partial_sequence() {
        assert_eq!(decode_excel_escapes("_x00"), "_x00");
        assert_eq!(decode_excel_escapes("_x000d"), "_x000d");
        assert_eq!(decode_excel_escapes("_xzzzz_"), "_xzzzz_");
    }

    #[test]
    fn test_read_shared_and_typed_cells() {
        let sst = r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><si><t>Words</t></si><si><r><t>ca</t></r><r><t>t</t></r></si><si><t>fish &amp; chips</t><rPh><t>ignored</t></rPh></si></sst>"#;
        let sheet = r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>
            <row r="1"><c r="A1" t="s"><v>0</v></c></row>
            <row r="2"><c r="A2" t="s"><v>1</v></c><c r="B2"><v>42</v></c></row>
            <row r="3"><c r="A3" t="s"><v>2</v></c><c r="B3" t="b"><v>1</v></c></row>
            <row r="4"><c r="A4" t="e"><v>#N/A</v></c><c r="B4"><f>1+1</f><v>2</v></c><c r="C4"><f>A1</f></c></row>
            <row r="5"><c r="A5" s="3"/></row>
        </sheetData></worksheet>"#;

        let workbook = XlsxReader::read(Cursor::new(package(Some(sst), sheet))).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Sheet1", "Lists"]);

        let ws = workbook.worksheet(0).unwrap();
        assert_eq!(ws.get_value("A1").unwrap(), CellValue::string("Words"));
        assert_eq!(ws.get_value("A2").unwrap(), CellValue::string("cat"));
        assert_eq!(ws.get_value("B2").unwrap(), CellValue::Number(42.0));
        assert_eq!(ws.get_value("A3").unwrap(), CellValue::string("fish & chips"));
        assert_eq!(ws.get_value("B3").unwrap(), CellValue::Boolean(true));
        assert_eq!(ws.get_value("A4").unwrap(), CellValue::Error("#N/A".into()));
        assert_eq!(ws.get_value("B4").unwrap(), CellValue::Number(2.0));
        assert_eq!(ws.get_value("C4").unwrap(), CellValue::Empty);
        assert_eq!(ws.get_value("A5").unwrap(), CellValue::Empty);

        let lists = workbook.worksheet_by_name("Lists").unwrap();
        assert_eq!(lists.get_value("A1").unwrap(), CellValue::string("other"));
    }

    #[test]
    fn test_cells_without_references() {
        let sheet = r#"<x:worksheet xmlns:x="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><x:sheetData>
            <x:row><x:c t="inlineStr"><x:is><x:t>Id</x:t></x:is></x:c><x:c t="inlineStr"><x:is><x:t>Words</x:t></x:is></x:c></x:row>
            <x:row><x:c/><x:c t="str"><x:v>line_x000a_break</x:v></x:c></x:row>
        </x:sheetData></x:worksheet>"#;

        let workbook = XlsxReader::read(Cursor::new(package(None, sheet))).unwrap();
        let ws = workbook.worksheet(0).unwrap();
        assert_eq!(ws.get_value("B1").unwrap(), CellValue::string("Words"));
        assert_eq!(ws.get_value("A2").unwrap(), CellValue::Empty);
        assert_eq!(ws.get_value("B2").unwrap(), CellValue::string("line\nbreak"));
    }

    #[test]
    fn test_rich_text_runs_keep_inner_spaces() {
        let sst = r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
            <si><t xml:space="preserve">Words </t></si>
            <si><r><t xml:space="preserve">ice </t></r><r><rPr><b/></rPr><t>cream</t></r></si>
            <si><r><t>hot</t></r><r><t xml:space="preserve"> </t></r><r><t>dog</t></r></si>
        </sst>"#;
        let sheet = r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>
            <row r="1"><c r="A1" t="s"><v>0</v></c></row>
            <row r="2"><c r="A2" t="s"><v>1</v></c></row>
            <row r="3"><c r="A3" t="s"><v>2</v></c></row>
            <row r="4"><c r="A4" t="inlineStr"><is><r><t xml:space="preserve">peanut </t></r><r><t>butter</t></r></is></c></row>
        </sheetData></worksheet>"#;

        let workbook = XlsxReader::read(Cursor::new(package(Some(sst), sheet))).unwrap();
        let ws = workbook.worksheet(0).unwrap();
        assert_eq!(ws.get_value("A1").unwrap(), CellValue::string("Words "));
        assert_eq!(ws.get_value("A2").unwrap(), CellValue::string("ice cream"));
        assert_eq!(ws.get_value("A3").unwrap(), CellValue::string("hot dog"));
        assert_eq!(ws.get_value("A4").unwrap(), CellValue::string("peanut butter"));
    }

    #[test]
    fn test_date_cells() {
        // A styled serial stays a number; typed ISO dates stay text
        let sheet = r#"<worksheet><sheetData><row r="1">
            <c r="A1" s="1"><v>45292</v></c>
            <c r="B1" t="d"><v>2024-01-01T00:00:00</v></c>
        </row></sheetData></worksheet>"#;

        let workbook = XlsxReader::read(Cursor::new(package(None, sheet))).unwrap();
        let ws = workbook.worksheet(0).unwrap();
        assert_eq!(ws.get_value("A1").unwrap(), CellValue::Number(45292.0));
        assert_eq!(ws.get_value("A1").unwrap().to_text().as_deref(), Some("45292"));
        assert_eq!(
            ws.get_value("B1").unwrap(),
            CellValue::string("2024-01-01T00:00:00")
        );
    }

    #[test]
    fn test_shared_string_out_of_range() {
        let sheet = r#"<worksheet><sheetData><row r="1"><c r="A1" t="s"><v>7</v></c></row></sheetData></worksheet>"#;
        let err = XlsxReader::read(Cursor::new(package(None, sheet))).unwrap_err();
        assert!(matches!(
            err,
            XlsxError::SharedStringOutOfRange { index: 7, len: 0 }
        ));
    }

    #[test]
    fn test_not_a_zip() {
        let err = XlsxReader::read(Cursor::new(b"Words\ncat\n".to_vec())).unwrap_err();
        assert!(matches!(err, XlsxError::Zip(_)));
    }

    #[test]
    fn test_missing_content_types() {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            zip.start_file("hello.txt", zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(b"hi").unwrap();
            zip.finish().unwrap();
        }
        let err = XlsxReader::read(Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, XlsxError::InvalidFormat(_)));
    }
}
