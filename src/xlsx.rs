// src/xlsx.rs
//
// Minimal Office Open XML workbook writer: one sheet, inline strings.
// The static package parts never change; only the worksheet XML is
// generated. Blank cells are omitted from the row element, which is
// how spreadsheet readers represent a missing value.

use std::error::Error;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::params::SHEET_NAME;

const XMLNS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const XMLNS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border/></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs></styleSheet>"#;

/// Write a single-sheet workbook: header row first, then data rows.
/// An existing file at `path` is overwritten.
pub fn write_workbook(
    path: &Path,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<(), Box<dyn Error>> {
    let sheet = sheet_xml(headers, rows)?;
    let workbook = workbook_xml()?;

    let mut zip = ZipWriter::new(File::create(path)?);

    for (name, data) in [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", ROOT_RELS.as_bytes()),
        ("xl/workbook.xml", &workbook),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes()),
        ("xl/styles.xml", STYLES.as_bytes()),
        ("xl/worksheets/sheet1.xml", &sheet),
    ] {
        zip.start_file(name, SimpleFileOptions::default())?;
        zip.write_all(data)?;
    }
    zip.finish()?;
    Ok(())
}

fn workbook_xml() -> Result<Vec<u8>, Box<dyn Error>> {
    let mut w = Writer::new(Cursor::new(Vec::new()));
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut workbook = BytesStart::new("workbook");
    workbook.push_attribute(("xmlns", XMLNS_MAIN));
    workbook.push_attribute(("xmlns:r", XMLNS_REL));
    w.write_event(Event::Start(workbook))?;
    w.write_event(Event::Start(BytesStart::new("sheets")))?;

    let mut sheet = BytesStart::new("sheet");
    sheet.push_attribute(("name", SHEET_NAME));
    sheet.push_attribute(("sheetId", "1"));
    sheet.push_attribute(("r:id", "rId1"));
    w.write_event(Event::Empty(sheet))?;

    w.write_event(Event::End(BytesEnd::new("sheets")))?;
    w.write_event(Event::End(BytesEnd::new("workbook")))?;
    Ok(w.into_inner().into_inner())
}

fn sheet_xml(headers: &[String], rows: &[Vec<String>]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut w = Writer::new(Cursor::new(Vec::new()));
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut worksheet = BytesStart::new("worksheet");
    worksheet.push_attribute(("xmlns", XMLNS_MAIN));
    w.write_event(Event::Start(worksheet))?;
    w.write_event(Event::Start(BytesStart::new("sheetData")))?;

    write_row(&mut w, 1, headers)?;
    for (i, row) in rows.iter().enumerate() {
        write_row(&mut w, i + 2, row)?;
    }

    w.write_event(Event::End(BytesEnd::new("sheetData")))?;
    w.write_event(Event::End(BytesEnd::new("worksheet")))?;
    Ok(w.into_inner().into_inner())
}

fn write_row(
    w: &mut Writer<Cursor<Vec<u8>>>,
    number: usize,
    cells: &[String],
) -> Result<(), Box<dyn Error>> {
    let mut row = BytesStart::new("row");
    let r = number.to_string();
    row.push_attribute(("r", r.as_str()));
    w.write_event(Event::Start(row))?;

    for (col, value) in cells.iter().enumerate() {
        if value.is_empty() {
            continue;
        }
        let mut cell = BytesStart::new("c");
        let reference = cell_reference(number, col);
        cell.push_attribute(("r", reference.as_str()));
        cell.push_attribute(("t", "inlineStr"));
        w.write_event(Event::Start(cell))?;
        w.write_event(Event::Start(BytesStart::new("is")))?;
        let mut text = BytesStart::new("t");
        if value.trim() != value {
            // Readers strip edge whitespace unless told not to
            text.push_attribute(("xml:space", "preserve"));
        }
        w.write_event(Event::Start(text))?;
        w.write_event(Event::Text(BytesText::new(value)))?;
        w.write_event(Event::End(BytesEnd::new("t")))?;
        w.write_event(Event::End(BytesEnd::new("is")))?;
        w.write_event(Event::End(BytesEnd::new("c")))?;
    }

    w.write_event(Event::End(BytesEnd::new("row")))?;
    Ok(())
}

/// `A1`-style reference from a 1-based row and 0-based column.
pub fn cell_reference(row: usize, mut col: usize) -> String {
    let mut letters = String::new();
    loop {
        letters.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    format!("{letters}{row}")
}
