//! Shared fixtures for odsgrid integration tests

#![allow(dead_code)]

use std::io::{Cursor, Write};

pub const SETTINGS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-settings xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" office:version="1.2"><office:settings/></office:document-settings>"#;

/// content.xml shaped like LibreOffice Calc output
///
/// Budget:
/// ```text
///      A         B        C       D
/// 1    Item      Amount   Paid            (header row group)
/// 2    Rent      1200     TRUE
/// 3    Cat food  350.5    FALSE
/// 4    date      25%      9.99 EUR  =B2+B3
/// 5..  (empty, repeated)
/// ```
/// Notes: a single cell with two paragraphs.
pub const CONTENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" xmlns:calcext="urn:org:documentfoundation:names:experimental:calc:xmlns:calcext:1.0" office:version="1.2">
  <office:automatic-styles/>
  <office:body>
    <office:spreadsheet>
      <table:calculation-settings table:automatic-find-labels="false"/>
      <table:table table:name="Budget">
        <table:table-column table:number-columns-repeated="4"/>
        <table:table-header-rows>
          <table:table-row>
            <table:table-cell office:value-type="string" calcext:value-type="string"><text:p>Item</text:p></table:table-cell>
            <table:table-cell office:value-type="string"><text:p>Amount</text:p></table:table-cell>
            <table:table-cell office:value-type="string"><text:p>Paid</text:p></table:table-cell>
          </table:table-row>
        </table:table-header-rows>
        <table:table-row>
          <table:table-cell office:value-type="string"><text:p>Rent</text:p></table:table-cell>
          <table:table-cell office:value-type="float" office:value="1200"><text:p>1200</text:p></table:table-cell>
          <table:table-cell office:value-type="boolean" office:boolean-value="true"><text:p>TRUE</text:p></table:table-cell>
        </table:table-row>
        <table:table-row>
          <table:table-cell office:value-type="string"><text:p>Cat<text:s/>food</text:p></table:table-cell>
          <table:table-cell office:value-type="float" office:value="350.5"><text:p>350.5</text:p></table:table-cell>
          <table:table-cell office:value-type="boolean" office:boolean-value="false"><text:p>FALSE</text:p></table:table-cell>
        </table:table-row>
        <table:table-row>
          <table:table-cell office:value-type="date" office:date-value="2014-03-01"><text:p>03/01/14</text:p></table:table-cell>
          <table:table-cell office:value-type="percentage" office:value="0.25"><text:p>25%</text:p></table:table-cell>
          <table:table-cell office:value-type="currency" office:currency="EUR" office:value="9.99"><text:p>9.99 &#8364;</text:p></table:table-cell>
          <table:table-cell table:formula="of:=[.B2]+[.B3]" office:value-type="float" office:value="1550.5"><text:p>1550.5</text:p></table:table-cell>
        </table:table-row>
        <table:table-row table:number-rows-repeated="1048571">
          <table:table-cell table:number-columns-repeated="1024"/>
        </table:table-row>
      </table:table>
      <table:table table:name="Notes">
        <table:table-column/>
        <table:table-row>
          <table:table-cell office:value-type="string"><text:p>line one</text:p><text:p>line two</text:p></table:table-cell>
        </table:table-row>
      </table:table>
    </office:spreadsheet>
  </office:body>
</office:document-content>"#;

/// A complete .ods package around [`CONTENT_XML`]
pub fn fixture_bytes() -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let stored = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);

    zip.start_file("mimetype", stored).unwrap();
    zip.write_all(b"application/vnd.oasis.opendocument.spreadsheet")
        .unwrap();

    for (name, content) in [
        ("content.xml", CONTENT_XML),
        ("settings.xml", SETTINGS_XML),
    ] {
        zip.start_file(name, zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Write the fixture into `dir` and return its path
pub fn write_fixture(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, fixture_bytes()).unwrap();
    path
}
