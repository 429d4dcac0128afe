//! # odsgrid
//!
//! Spreadsheet-style addressing into OpenDocument spreadsheets (`.ods`).
//!
//! Tables, rows and cells are reached by position (negative positions count
//! from the end), by slice, or by name: a table by its name, a cell by its
//! A1-style address ("B3"), a block of cells by a range ("A1:C5").
//!
//! ## Features
//!
//! - Open an `.ods` file, or start a new one when the file does not exist
//! - Nested indexing across spreadsheet, table, row and cell levels
//! - Typed cell values (float, percentage, currency, date, time, boolean, string)
//! - Rename tables, append rows and cells, set values, and save
//! - Untouched package parts (styles, settings, images) are written back as read
//!
//! ## Example
//!
//! ```rust
//! use odsgrid::prelude::*;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("budget");
//!
//! // "budget" does not exist yet, so this starts an empty "budget.ods"
//! let mut sheet = Spreadsheet::open(&path).unwrap();
//! {
//!     let mut table = sheet.add_table("Q1");
//!     let mut row = table.append_row();
//!     row.append_cell().set_value("Rent".into());
//!     row.append_cell().set_value(1200.0.into());
//! }
//! sheet.save().unwrap();
//!
//! let sheet = Spreadsheet::open(dir.path().join("budget.ods")).unwrap();
//! assert_eq!(sheet.len(), 1);
//! assert_eq!(sheet.cell("Q1", "B1").unwrap().value(), CellValue::Float(1200.0));
//! assert_eq!(sheet.table(0).unwrap().to_string(), "<Table: Q1>");
//! ```

pub mod prelude;
pub mod spreadsheet;

pub use spreadsheet::{Spreadsheet, ODS_EXTENSION};

// Re-export core types
pub use odsgrid_core::{
    // Addressing
    CellAddress,
    CellRange,
    // Views
    Cell,
    CellMut,
    // Values
    CellValue,
    ColumnSpan,
    Element,
    // Error types
    Error,
    Index,
    Indexable,
    Node,
    OdfView,
    Result,
    Row,
    RowMut,
    Selection,
    Slice,
    SpreadsheetDocument,
    SpreadsheetView,
    Table,
    TableMut,
    // Constants
    MAX_COLS,
    MAX_ROWS,
};

// Re-export I/O types
pub use odsgrid_ods::{
    OdsError, OdsPackage, OdsReadOptions, OdsReader, OdsResult, OdsWriteOptions, OdsWriter,
};
