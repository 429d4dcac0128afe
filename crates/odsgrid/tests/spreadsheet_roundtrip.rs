//! End-to-end tests for open -> modify -> save -> reopen

mod common;

use odsgrid::prelude::*;
use odsgrid::{OdsReadOptions, OdsWriteOptions};
use pretty_assertions::assert_eq;
use std::fs::File;
use std::io::{Cursor, Read, Write};

/// A missing file starts an empty spreadsheet, and ".ods" is appended
#[test]
fn test_open_missing_creates_new() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = Spreadsheet::open(dir.path().join("fresh")).unwrap();

    assert_eq!(sheet.path(), dir.path().join("fresh.ods"));
    assert!(sheet.is_empty());
    assert!(!sheet.path().exists());

    sheet.save().unwrap();
    assert!(sheet.path().is_file());

    let reopened = Spreadsheet::open(dir.path().join("fresh.ods")).unwrap();
    assert_eq!(reopened.len(), 0);
}

#[test]
fn test_build_save_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let mut sheet = Spreadsheet::open(dir.path().join("built.ods")).unwrap();
    {
        let mut table = sheet.add_table("Numbers & <Text>");
        for r in 0..3 {
            let mut row = table.append_row();
            row.append_cell().set_value(CellValue::Float(r as f64 * 1.5));
            row.append_cell()
                .set_value(CellValue::string(format!("row \"{}\"", r + 1)));
            row.append_cell().set_value(CellValue::Boolean(r % 2 == 0));
        }
    }
    sheet.add_table("Empty");
    sheet.save().unwrap();

    let sheet = Spreadsheet::open(dir.path().join("built")).unwrap();
    assert_eq!(sheet.len(), 2);

    let table = sheet.table(0).unwrap();
    assert_eq!(table.name(), Some("Numbers & <Text>"));
    assert_eq!(table.cell("A3").unwrap().value(), CellValue::Float(3.0));
    assert_eq!(table.cell("B2").unwrap().text(), "row \"2\"");
    assert_eq!(table.cell("C1").unwrap().value(), CellValue::Boolean(true));
    assert_eq!(table.cell("C2").unwrap().text(), "FALSE");
    assert!(sheet.table_by_name("Empty").unwrap().is_empty());
}

#[test]
fn test_modify_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_fixture(dir.path(), "budget.ods");

    let mut sheet = Spreadsheet::open(&path).unwrap();
    sheet.table_mut(0).unwrap().set_name("Budget 2014");
    {
        let mut budget = sheet.table_by_name_mut("Budget 2014").unwrap();
        budget
            .cell_mut("B2")
            .unwrap()
            .set_value(CellValue::Float(1250.0));
        budget.cell_mut("D4").unwrap().clear();
    }
    sheet.save().unwrap();

    let sheet = Spreadsheet::open(&path).unwrap();
    assert!(sheet.table_by_name("Budget").is_err());
    let budget = sheet.table_by_name("Budget 2014").unwrap();
    assert_eq!(budget.cell("B2").unwrap().value(), CellValue::Float(1250.0));
    assert_eq!(budget.cell("B2").unwrap().text(), "1250");
    assert_eq!(budget.cell("D4").unwrap().value(), CellValue::Empty);
    assert_eq!(budget.cell("D4").unwrap().formula(), None);

    // Untouched content survives
    assert_eq!(budget.cell("A3").unwrap().text(), "Cat food");
    assert_eq!(budget.row(-1).unwrap().repeated(), 1_048_571);
    assert_eq!(
        sheet.cell("Notes", "A1").unwrap().text(),
        "line one\nline two"
    );
}

/// Writing into the trailing run of empty rows changes one cell only
#[test]
fn test_write_into_repeated_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_fixture(dir.path(), "runs.ods");

    let mut sheet = Spreadsheet::open(&path).unwrap();
    sheet
        .table_by_name_mut("Budget")
        .unwrap()
        .cell_mut("A5")
        .unwrap()
        .set_value(CellValue::string("x"));
    sheet.save().unwrap();

    let sheet = Spreadsheet::open(&path).unwrap();
    let budget = sheet.table_by_name("Budget").unwrap();
    assert_eq!(budget.len(), 6);

    let written = budget.row(4).unwrap();
    assert_eq!(written.repeated(), 1);
    assert_eq!(written.cell(0).unwrap().text(), "x");
    assert_eq!(written.cell(0).unwrap().repeated(), 1);
    assert_eq!(written.cell(1).unwrap().repeated(), 1023);
    assert_eq!(written.cell(1).unwrap().value(), CellValue::Empty);

    let rest = budget.row(5).unwrap();
    assert_eq!(rest.repeated(), 1_048_570);
    assert_eq!(rest.cell(0).unwrap().repeated(), 1024);
    assert_eq!(rest.cell(0).unwrap().value(), CellValue::Empty);
}

#[test]
fn test_package_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_fixture(dir.path(), "layout.ods");
    Spreadsheet::open(&path).unwrap().save().unwrap();

    let mut archive = zip::ZipArchive::new(File::open(&path).unwrap()).unwrap();

    {
        let mut first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "mimetype");
        assert_eq!(first.compression(), zip::CompressionMethod::Stored);
        let mut mimetype = String::new();
        first.read_to_string(&mut mimetype).unwrap();
        assert_eq!(mimetype, "application/vnd.oasis.opendocument.spreadsheet");
    }

    // Pass-through part is byte-identical
    let mut settings = String::new();
    archive
        .by_name("settings.xml")
        .unwrap()
        .read_to_string(&mut settings)
        .unwrap();
    assert_eq!(settings, common::SETTINGS_XML);

    // Parts the fixture lacked are generated
    for name in ["styles.xml", "meta.xml", "META-INF/manifest.xml"] {
        assert!(archive.by_name(name).is_ok(), "missing {}", name);
    }
}

#[test]
fn test_bytes_round_trip() {
    let sheet = Spreadsheet::from_reader(Cursor::new(common::fixture_bytes()), "mem").unwrap();
    let bytes = sheet.to_bytes().unwrap();

    let again = Spreadsheet::from_reader(Cursor::new(bytes), "mem").unwrap();
    assert_eq!(again.document(), sheet.document());
    assert_eq!(again.path(), std::path::Path::new("mem.ods"));
}

#[test]
fn test_uncompressed_write() {
    let mut sheet = Spreadsheet::create("plain");
    sheet.add_table("T").append_row().append_cell().set_value("x".into());
    sheet.set_write_options(OdsWriteOptions {
        compress: false,
        ..Default::default()
    });
    let bytes = sheet.to_bytes().unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let content = archive.by_name("content.xml").unwrap();
    assert_eq!(content.compression(), zip::CompressionMethod::Stored);
}

#[test]
fn test_mimetype_checks() {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("mimetype", zip::write::SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"application/vnd.oasis.opendocument.text")
        .unwrap();
    zip.start_file("content.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    zip.write_all(common::CONTENT_XML.as_bytes()).unwrap();
    let bytes = zip.finish().unwrap().into_inner();

    // Lenient by default
    let package = OdsReader::read(Cursor::new(bytes.clone())).unwrap();
    assert_eq!(package.document.table_count(), 2);

    let strict = OdsReadOptions {
        strict_mimetype: true,
    };
    let err = OdsReader::read_with_options(Cursor::new(bytes), &strict).unwrap_err();
    assert!(matches!(err, OdsError::InvalidFormat(_)));
}

#[test]
fn test_missing_content_is_an_error() {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("mimetype", zip::write::SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"application/vnd.oasis.opendocument.spreadsheet")
        .unwrap();
    let bytes = zip.finish().unwrap().into_inner();

    let err = OdsReader::read(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, OdsError::MissingPart(ref p) if p == "content.xml"));

    let err = OdsReader::read(Cursor::new(b"not a zip".to_vec())).unwrap_err();
    assert!(matches!(err, OdsError::Zip(_)));
}
