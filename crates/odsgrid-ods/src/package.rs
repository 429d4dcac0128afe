//! In-memory ODS package

use odsgrid_core::SpreadsheetDocument;

/// Media type of an OpenDocument spreadsheet, the content of the `mimetype`
/// entry
pub const SPREADSHEET_MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

pub const MIMETYPE_PART: &str = "mimetype";
pub const CONTENT_PART: &str = "content.xml";
pub const STYLES_PART: &str = "styles.xml";
pub const META_PART: &str = "meta.xml";
pub const MANIFEST_PART: &str = "META-INF/manifest.xml";

/// A package entry kept as raw bytes and written back unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePart {
    pub name: String,
    pub data: Vec<u8>,
}

/// An `.ods` package: the parsed `content.xml` plus every other entry
#[derive(Debug, Clone, Default)]
pub struct OdsPackage {
    pub document: SpreadsheetDocument,
    parts: Vec<PackagePart>,
}

impl OdsPackage {
    /// A package holding an empty spreadsheet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(document: SpreadsheetDocument, parts: Vec<PackagePart>) -> Self {
        Self { document, parts }
    }

    /// Entries other than `mimetype` and `content.xml`, in archive order
    pub fn parts(&self) -> &[PackagePart] {
        &self.parts
    }

    pub fn part(&self, name: &str) -> Option<&PackagePart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Insert or replace a pass-through entry
    pub fn set_part<S: Into<String>>(&mut self, name: S, data: Vec<u8>) {
        let name = name.into();
        match self.parts.iter_mut().find(|p| p.name == name) {
            Some(part) => part.data = data,
            None => self.parts.push(PackagePart { name, data }),
        }
    }
}
