//! ODS reader

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{OdsError, OdsResult};
use crate::options::OdsReadOptions;
use crate::package::{OdsPackage, PackagePart, CONTENT_PART, MIMETYPE_PART, SPREADSHEET_MIMETYPE};
use odsgrid_core::{Element, SpreadsheetDocument};

/// Largest buffer reserved up front for a package part
const MAX_PREALLOC: u64 = 1 << 20;

/// ODS file reader
pub struct OdsReader;

impl OdsReader {
    /// Read a package from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> OdsResult<OdsPackage> {
        Self::read_file_with_options(path, &OdsReadOptions::default())
    }

    /// Read a package from a file path with options
    pub fn read_file_with_options<P: AsRef<Path>>(
        path: P,
        options: &OdsReadOptions,
    ) -> OdsResult<OdsPackage> {
        let path = path.as_ref();
        log::debug!("Reading ODS package from {}", path.display());
        let file = File::open(path)?;
        Self::read_with_options(BufReader::new(file), options)
    }

    /// Read a package from a reader
    pub fn read<R: Read + Seek>(reader: R) -> OdsResult<OdsPackage> {
        Self::read_with_options(reader, &OdsReadOptions::default())
    }

    /// Read a package from a reader with options
    pub fn read_with_options<R: Read + Seek>(
        reader: R,
        options: &OdsReadOptions,
    ) -> OdsResult<OdsPackage> {
        let mut archive = zip::ZipArchive::new(reader)?;

        Self::check_mimetype(&mut archive, options)?;

        let root = {
            let file = archive
                .by_name(CONTENT_PART)
                .map_err(|_| OdsError::MissingPart(CONTENT_PART.into()))?;
            Self::parse_xml(BufReader::new(file))?
        };
        let document = SpreadsheetDocument::from_root(root)?;

        // Everything else is carried through untouched
        let mut parts = Vec::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() || file.name() == MIMETYPE_PART || file.name() == CONTENT_PART {
                continue;
            }
            let name = file.name().to_string();
            let mut data = Vec::with_capacity(initial_capacity(file.size()));
            file.read_to_end(&mut data)?;
            log::debug!("Keeping package part {} ({} bytes)", name, data.len());
            parts.push(PackagePart { name, data });
        }

        log::debug!(
            "Read ODS package with {} tables and {} other parts",
            document.table_count(),
            parts.len()
        );

        Ok(OdsPackage::from_parts(document, parts))
    }

    fn check_mimetype<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        options: &OdsReadOptions,
    ) -> OdsResult<()> {
        let mimetype = match archive.by_name(MIMETYPE_PART) {
            Ok(mut file) => {
                let mut s = String::new();
                file.read_to_string(&mut s)?;
                Some(s)
            }
            Err(_) => None,
        };

        match mimetype.as_deref().map(str::trim) {
            Some(SPREADSHEET_MIMETYPE) => Ok(()),
            other => {
                let found = other.unwrap_or("<missing>");
                if options.strict_mimetype {
                    return Err(OdsError::InvalidFormat(format!(
                        "mimetype is '{}', expected '{}'",
                        found, SPREADSHEET_MIMETYPE
                    )));
                }
                log::warn!(
                    "Unexpected ODS mimetype '{}', reading content.xml anyway",
                    found
                );
                Ok(())
            }
        }
    }

    /// Parse an XML part into an element tree
    ///
    /// Text is kept exactly as written, including whitespace between
    /// elements. Comments, processing instructions and the XML declaration
    /// are dropped.
    pub fn parse_xml<B: BufRead>(reader: B) -> OdsResult<Element> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => stack.push(Self::element_from_start(&e)?),
                Event::Empty(e) => {
                    let element = Self::element_from_start(&e)?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        OdsError::InvalidFormat("unbalanced closing tag".into())
                    })?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::Text(e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = e.unescape()?;
                        if !text.is_empty() {
                            parent.push_text(text.into_owned());
                        }
                    }
                }
                Event::CData(e) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.push_text(String::from_utf8_lossy(&e.into_inner()).into_owned());
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(OdsError::InvalidFormat(format!(
                "unclosed element <{}>",
                stack.last().map(Element::name).unwrap_or_default()
            )));
        }

        root.ok_or_else(|| OdsError::InvalidFormat("document has no root element".into()))
    }

    fn element_from_start(e: &BytesStart<'_>) -> OdsResult<Element> {
        let mut element = Element::new(String::from_utf8_lossy(e.name().as_ref()));
        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            element.set_attribute(key, value);
        }
        Ok(element)
    }

    /// Hang a finished element on its parent, or make it the root
    fn attach(
        stack: &mut [Element],
        root: &mut Option<Element>,
        element: Element,
    ) -> OdsResult<()> {
        match stack.last_mut() {
            Some(parent) => parent.push_element(element),
            None if root.is_none() => *root = Some(element),
            None => {
                return Err(OdsError::InvalidFormat(format!(
                    "second root element <{}>",
                    element.name()
                )))
            }
        }
        Ok(())
    }
}

/// Capacity to reserve for a part whose header declares `declared` bytes
///
/// The declared size comes from the archive and is not trusted beyond
/// [`MAX_PREALLOC`]; the buffer grows as the real data arrives.
fn initial_capacity(declared: u64) -> usize {
    declared.min(MAX_PREALLOC) as usize
}
