//! # odsgrid-ods
//!
//! ODS (OpenDocument spreadsheet) package reader and writer for odsgrid.
//!
//! The reader parses `content.xml` into an [`odsgrid_core::SpreadsheetDocument`]
//! and keeps every other package entry as raw bytes; the writer serializes the
//! document back and writes the other entries unchanged.

pub mod error;
pub mod options;
pub mod package;
pub mod reader;
pub mod writer;

pub use error::{OdsError, OdsResult};
pub use options::{OdsReadOptions, OdsWriteOptions};
pub use package::{OdsPackage, PackagePart, SPREADSHEET_MIMETYPE};
pub use reader::OdsReader;
pub use writer::OdsWriter;
