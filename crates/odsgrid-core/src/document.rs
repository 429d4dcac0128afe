//! The spreadsheet document: an owned `office:document-content` tree

use crate::dom::{Element, Node};
use crate::error::{Error, Result};
use crate::view::{OdfView, SpreadsheetView, TableMut, SPREADSHEET_TAG, TABLE_TAG};

pub const DOCUMENT_CONTENT_TAG: &str = "office:document-content";
pub const BODY_TAG: &str = "office:body";

/// Namespace declarations written on a newly created document
const NAMESPACES: &[(&str, &str)] = &[
    (
        "xmlns:office",
        "urn:oasis:names:tc:opendocument:xmlns:office:1.0",
    ),
    ("xmlns:style", "urn:oasis:names:tc:opendocument:xmlns:style:1.0"),
    ("xmlns:text", "urn:oasis:names:tc:opendocument:xmlns:text:1.0"),
    ("xmlns:table", "urn:oasis:names:tc:opendocument:xmlns:table:1.0"),
    (
        "xmlns:fo",
        "urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0",
    ),
    ("xmlns:of", "urn:oasis:names:tc:opendocument:xmlns:of:1.2"),
];

/// `office:spreadsheet` children that follow the tables
const TRAILING_ELEMENTS: &[&str] = &[
    "table:named-expressions",
    "table:database-ranges",
    "table:data-pilot-tables",
    "table:consolidation",
    "table:dde-links",
];

/// ODF version written on new documents
pub const ODF_VERSION: &str = "1.2";

/// A spreadsheet's content tree
///
/// The root is always an `office:document-content` element containing
/// `office:body/office:spreadsheet`; both constructors guarantee it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetDocument {
    root: Element,
}

impl Default for SpreadsheetDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl SpreadsheetDocument {
    /// An empty spreadsheet with no tables
    pub fn new() -> Self {
        let mut root = Element::new(DOCUMENT_CONTENT_TAG);
        for (key, value) in NAMESPACES {
            root.set_attribute(*key, *value);
        }
        root.set_attribute("office:version", ODF_VERSION);
        root.push_element(Element::new("office:scripts"));
        root.push_element(Element::new("office:font-face-decls"));
        root.push_element(Element::new("office:automatic-styles"));
        root.push_element(Element::new(BODY_TAG).with_child(Element::new(SPREADSHEET_TAG)));
        Self { root }
    }

    /// Adopt a parsed `content.xml` root
    pub fn from_root(root: Element) -> Result<Self> {
        if root.name() != DOCUMENT_CONTENT_TAG {
            return Err(Error::UnexpectedElement {
                expected: DOCUMENT_CONTENT_TAG,
                found: root.name().to_string(),
            });
        }
        let has_body = root
            .find_child(BODY_TAG)
            .and_then(|b| b.find_child(SPREADSHEET_TAG))
            .is_some();
        if !has_body {
            return Err(Error::MissingSpreadsheet);
        }
        Ok(Self { root })
    }

    /// The whole content tree, for serialization
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }

    fn spreadsheet_element(&self) -> &Element {
        self.root
            .find_child(BODY_TAG)
            .and_then(|b| b.find_child(SPREADSHEET_TAG))
            .expect("spreadsheet body checked at construction")
    }

    /// The `office:spreadsheet` element, mutably
    pub fn spreadsheet_element_mut(&mut self) -> &mut Element {
        self.root
            .find_child_mut(BODY_TAG)
            .and_then(|b| b.find_child_mut(SPREADSHEET_TAG))
            .expect("spreadsheet body checked at construction")
    }

    /// Indexable view of the tables
    pub fn spreadsheet(&self) -> SpreadsheetView<'_> {
        SpreadsheetView::wrap(self.spreadsheet_element())
    }

    pub fn table_count(&self) -> usize {
        self.spreadsheet_element().count_descendants(TABLE_TAG)
    }

    /// Add a new, empty table after the existing ones
    ///
    /// The table goes in front of any named expressions, database ranges and
    /// similar elements that close the spreadsheet body.
    pub fn add_table<S: Into<String>>(&mut self, name: S) -> TableMut<'_> {
        let table = Element::new(TABLE_TAG)
            .with_attribute("table:name", name)
            .with_child(Element::new("table:table-column"));
        let sheet = self.spreadsheet_element_mut();
        let at = sheet
            .children()
            .iter()
            .position(|c| matches!(c, Node::Element(e) if TRAILING_ELEMENTS.contains(&e.name())))
            .unwrap_or(sheet.children().len());
        let element = sheet.insert_element_mut(at, table);
        TableMut::new(element).expect("freshly built table element")
    }

    /// Mutable access to a table by position (negative counts from the end)
    pub fn table_mut(&mut self, index: isize) -> Result<TableMut<'_>> {
        let sheet = self.spreadsheet_element_mut();
        let len = sheet.count_descendants(TABLE_TAG);
        let pos = crate::index::resolve_position(index, len, "spreadsheet")?;
        let element = sheet
            .nth_descendant_mut(TABLE_TAG, pos)
            .ok_or(Error::IndexOutOfRange {
                index,
                len,
                element: "spreadsheet",
            })?;
        TableMut::new(element)
    }

    /// Mutable access to a table by its `table:name`
    pub fn table_by_name_mut(&mut self, name: &str) -> Result<TableMut<'_>> {
        let pos = self
            .spreadsheet()
            .tables()
            .iter()
            .position(|t| t.name() == Some(name))
            .ok_or_else(|| Error::TableNotFound(name.to_string()))?;
        self.table_mut(pos as isize)
    }
}
