//! ODS writer

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use crate::error::OdsResult;
use crate::options::OdsWriteOptions;
use crate::package::{
    OdsPackage, CONTENT_PART, MANIFEST_PART, META_PART, MIMETYPE_PART, SPREADSHEET_MIMETYPE,
    STYLES_PART,
};
use odsgrid_core::document::ODF_VERSION;
use odsgrid_core::{Element, Node};

/// ODS file writer
pub struct OdsWriter;

impl OdsWriter {
    /// Write a package to a file path
    pub fn write_file<P: AsRef<Path>>(package: &OdsPackage, path: P) -> OdsResult<()> {
        Self::write_file_with_options(package, path, &OdsWriteOptions::default())
    }

    /// Write a package to a file path with options
    pub fn write_file_with_options<P: AsRef<Path>>(
        package: &OdsPackage,
        path: P,
        options: &OdsWriteOptions,
    ) -> OdsResult<()> {
        let path = path.as_ref();
        log::debug!("Writing ODS package to {}", path.display());
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_with_options(package, &mut writer, options)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a package to a writer
    pub fn write<W: Write + Seek>(package: &OdsPackage, writer: W) -> OdsResult<()> {
        Self::write_with_options(package, writer, &OdsWriteOptions::default())
    }

    /// Write a package to a writer with options
    pub fn write_with_options<W: Write + Seek>(
        package: &OdsPackage,
        writer: W,
        options: &OdsWriteOptions,
    ) -> OdsResult<()> {
        let mut zip = zip::ZipWriter::new(writer);

        // mimetype must be the first entry, stored uncompressed
        zip.start_file(MIMETYPE_PART, Self::file_options(false))?;
        zip.write_all(SPREADSHEET_MIMETYPE.as_bytes())?;

        zip.start_file(CONTENT_PART, Self::file_options(options.compress))?;
        zip.write_all(Self::serialize_document(package.document.root()).as_bytes())?;

        for part in package.parts() {
            zip.start_file(part.name.as_str(), Self::file_options(options.compress))?;
            zip.write_all(&part.data)?;
        }

        // A package built from scratch needs the remaining required parts
        if package.part(STYLES_PART).is_none() {
            zip.start_file(STYLES_PART, Self::file_options(options.compress))?;
            zip.write_all(Self::default_styles_xml().as_bytes())?;
        }
        if package.part(META_PART).is_none() {
            zip.start_file(META_PART, Self::file_options(options.compress))?;
            zip.write_all(Self::default_meta_xml(&options.generator).as_bytes())?;
        }
        if package.part(MANIFEST_PART).is_none() {
            zip.start_file(MANIFEST_PART, Self::file_options(options.compress))?;
            zip.write_all(Self::default_manifest_xml(package).as_bytes())?;
        }

        zip.finish()?;
        log::debug!(
            "Wrote ODS package with {} tables",
            package.document.table_count()
        );
        Ok(())
    }

    fn file_options(compress: bool) -> zip::write::SimpleFileOptions {
        let method = if compress {
            zip::CompressionMethod::Deflated
        } else {
            zip::CompressionMethod::Stored
        };
        zip::write::SimpleFileOptions::default().compression_method(method)
    }

    /// Serialize an element tree as a standalone XML document
    pub fn serialize_document(root: &Element) -> String {
        let mut out = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        out.push('\n');
        Self::write_element(&mut out, root);
        out
    }

    fn write_element(out: &mut String, element: &Element) {
        out.push('<');
        out.push_str(element.name());
        for (key, value) in element.attributes() {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&Self::escape_xml_attr(value));
            out.push('"');
        }

        if element.children().is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in element.children() {
            match child {
                Node::Element(e) => Self::write_element(out, e),
                Node::Text(t) => out.push_str(&Self::escape_xml(t)),
            }
        }
        out.push_str("</");
        out.push_str(element.name());
        out.push('>');
    }

    fn escape_xml(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    /// Attribute values also escape quotes, and the whitespace characters an
    /// XML parser would otherwise normalize to spaces
    fn escape_xml_attr(s: &str) -> String {
        Self::escape_xml(s)
            .replace('"', "&quot;")
            .replace('\'', "&apos;")
            .replace('\n', "&#10;")
            .replace('\r', "&#13;")
            .replace('\t', "&#9;")
    }

    fn default_styles_xml() -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-styles xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" office:version="{}"><office:styles/><office:automatic-styles/><office:master-styles/></office:document-styles>"#,
            ODF_VERSION
        )
    }

    fn default_meta_xml(generator: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-meta xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:meta="urn:oasis:names:tc:opendocument:xmlns:meta:1.0" office:version="{}"><office:meta><meta:generator>{}</meta:generator></office:meta></office:document-meta>"#,
            ODF_VERSION,
            Self::escape_xml(generator)
        )
    }

    /// Manifest listing the generated parts and every carried-through part
    fn default_manifest_xml(package: &OdsPackage) -> String {
        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="{v}">
 <manifest:file-entry manifest:full-path="/" manifest:version="{v}" manifest:media-type="{mime}"/>"#,
            v = ODF_VERSION,
            mime = SPREADSHEET_MIMETYPE
        );

        let required = [CONTENT_PART, STYLES_PART, META_PART];
        let kept = package
            .parts()
            .iter()
            .map(|p| p.name.as_str())
            .filter(|name| !required.contains(name) && *name != MANIFEST_PART);

        for part in required.into_iter().chain(kept) {
            let media_type = if part.ends_with(".xml") { "text/xml" } else { "" };
            content.push_str(&format!(
                r#"
 <manifest:file-entry manifest:full-path="{}" manifest:media-type="{}"/>"#,
                Self::escape_xml_attr(part),
                media_type
            ));
        }

        content.push_str("\n</manifest:manifest>");
        content
    }
}
