//! # odsgrid-core
//!
//! Core data structures for the odsgrid library.
//!
//! This crate provides the addressing layer over an OpenDocument spreadsheet's
//! element tree:
//! - [`CellAddress`], [`CellRange`] and [`ColumnSpan`] - "B3", "A1:C5", "B:D"
//! - [`Index`] and [`Slice`] - one level of a nested index path
//! - [`Element`] - the owned XML element tree
//! - [`SpreadsheetView`], [`Table`], [`Row`], [`Cell`] - typed views with
//!   positional, sliced and named indexing
//! - [`SpreadsheetDocument`] - the `content.xml` tree of a spreadsheet
//!
//! ## Example
//!
//! ```rust
//! use odsgrid_core::{CellValue, SpreadsheetDocument};
//!
//! let mut doc = SpreadsheetDocument::new();
//! let mut table = doc.add_table("Sheet1");
//! let mut row = table.append_row();
//! row.append_cell().set_value(CellValue::string("Hello"));
//! row.append_cell().set_value(42.0.into());
//!
//! let table = doc.spreadsheet().table(0).unwrap();
//! assert_eq!(table.cell("A1").unwrap().text(), "Hello");
//! assert_eq!(table.cell("B1").unwrap().value(), CellValue::Float(42.0));
//! ```

pub mod address;
pub mod document;
pub mod dom;
pub mod error;
pub mod index;
pub mod value;
pub mod view;

// Re-exports for convenience
pub use address::{CellAddress, CellRange, ColumnSpan};
pub use document::SpreadsheetDocument;
pub use dom::{Element, Node};
pub use error::{Error, Result};
pub use index::{Index, Slice};
pub use value::CellValue;
pub use view::{
    Cell, CellMut, Indexable, OdfView, Row, RowMut, Selection, SpreadsheetView, Table, TableMut,
};

/// Maximum number of rows in a table (LibreOffice Calc limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a table (LibreOffice Calc limit)
pub const MAX_COLS: u16 = 16_384;
