//! Prelude module - common imports for odsgrid users
//!
//! ```rust
//! use odsgrid::prelude::*;
//! ```

pub use crate::{
    // Addressing
    CellAddress,
    CellRange,
    // Cell types
    CellValue,
    // Error types
    Error,
    Index,
    // Traits for indexing
    Indexable,
    OdfView,
    OdsError,
    // I/O types
    OdsReader,
    OdsWriter,
    Result,
    Selection,
    Slice,
    // Main types
    Spreadsheet,
    Table,
};
