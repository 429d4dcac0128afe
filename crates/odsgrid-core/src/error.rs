//! Error types for odsgrid-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while addressing into a spreadsheet
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u16),

    /// Child position out of range for the element being indexed
    #[error("Index {index} out of range for {element} with {len} children")]
    IndexOutOfRange {
        index: isize,
        len: usize,
        element: &'static str,
    },

    /// Slice with a step of zero
    #[error("Slice step cannot be zero")]
    ZeroStep,

    /// More indices were supplied than there are nesting levels
    #[error("Too many indices: {0} has no children to index")]
    TooManyIndices(&'static str),

    /// Table not found by name
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// A view was constructed over an element of the wrong kind
    #[error("Expected element <{expected}>, found <{found}>")]
    UnexpectedElement {
        expected: &'static str,
        found: String,
    },

    /// Document has no office:body/office:spreadsheet
    #[error("Document does not contain an office:spreadsheet body")]
    MissingSpreadsheet,
}
