//! Path-bound spreadsheet: open-or-create, index, save

use std::ffi::OsString;
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use odsgrid_core::{
    Cell, Index, OdfView, Result, Selection, SpreadsheetDocument, SpreadsheetView, Table,
    TableMut,
};
use odsgrid_ods::{OdsPackage, OdsReadOptions, OdsReader, OdsResult, OdsWriteOptions, OdsWriter};

/// File extension every spreadsheet path is normalized to
pub const ODS_EXTENSION: &str = ".ods";

/// An `.ods` spreadsheet bound to a file path
///
/// [`Spreadsheet::open`] loads the file when it exists and otherwise starts an
/// empty spreadsheet that [`Spreadsheet::save`] will create.
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    path: PathBuf,
    package: OdsPackage,
    write_options: OdsWriteOptions,
}

impl Spreadsheet {
    /// Open the spreadsheet at `path`, or start a new one there
    ///
    /// `.ods` is appended to the path unless it already ends with it.
    pub fn open<P: AsRef<Path>>(path: P) -> OdsResult<Self> {
        Self::open_with_options(path, &OdsReadOptions::default())
    }

    /// [`Spreadsheet::open`] with reader options
    pub fn open_with_options<P: AsRef<Path>>(
        path: P,
        options: &OdsReadOptions,
    ) -> OdsResult<Self> {
        let path = with_ods_extension(path.as_ref());
        let package = if path.is_file() {
            OdsReader::read_file_with_options(&path, options)?
        } else {
            log::debug!(
                "{} does not exist, starting an empty spreadsheet",
                path.display()
            );
            OdsPackage::new()
        };
        Ok(Self {
            path,
            package,
            write_options: OdsWriteOptions::default(),
        })
    }

    /// A new, empty spreadsheet bound to `path` (the file is not read)
    pub fn create<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: with_ods_extension(path.as_ref()),
            package: OdsPackage::new(),
            write_options: OdsWriteOptions::default(),
        }
    }

    /// Load from any seekable reader, binding the result to `path`
    pub fn from_reader<R: Read + Seek, P: AsRef<Path>>(reader: R, path: P) -> OdsResult<Self> {
        Ok(Self {
            path: with_ods_extension(path.as_ref()),
            package: OdsReader::read(reader)?,
            write_options: OdsWriteOptions::default(),
        })
    }

    /// The bound path, always ending in `.ods`
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_write_options(&mut self, options: OdsWriteOptions) {
        self.write_options = options;
    }

    pub fn document(&self) -> &SpreadsheetDocument {
        &self.package.document
    }

    pub fn document_mut(&mut self) -> &mut SpreadsheetDocument {
        &mut self.package.document
    }

    pub fn package(&self) -> &OdsPackage {
        &self.package
    }

    /// Indexable view of the tables
    pub fn view(&self) -> SpreadsheetView<'_> {
        self.package.document.spreadsheet()
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.package.document.table_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tables(&self) -> Vec<Table<'_>> {
        self.view().tables()
    }

    /// A table by position; negative positions count from the end
    pub fn table(&self, index: isize) -> Result<Table<'_>> {
        self.view().table(index)
    }

    pub fn table_by_name(&self, name: &str) -> Result<Table<'_>> {
        self.view().table_by_name(name)
    }

    /// Nested indexing from the spreadsheet level
    ///
    /// `sheet.select(&["Sheet1".into(), "B3".into()])` is the cell B3 of the
    /// table named Sheet1; `sheet.select(&[0i32.into(), (0isize..2).into()])`
    /// the first two rows of the first table.
    pub fn select(&self, path: &[Index]) -> Result<Selection<'_>> {
        self.view().select(path)
    }

    /// A cell by table (position or name) and A1-style address
    pub fn cell<I: Into<Index>>(&self, table: I, address: &str) -> Result<Cell<'_>> {
        let selection = self.select(&[table.into(), Index::name(address)])?;
        selection.as_cell().ok_or_else(|| {
            odsgrid_core::Error::InvalidAddress(format!("'{}' is not a single cell", address))
        })
    }

    pub fn table_mut(&mut self, index: isize) -> Result<TableMut<'_>> {
        self.package.document.table_mut(index)
    }

    pub fn table_by_name_mut(&mut self, name: &str) -> Result<TableMut<'_>> {
        self.package.document.table_by_name_mut(name)
    }

    pub fn add_table<S: Into<String>>(&mut self, name: S) -> TableMut<'_> {
        self.package.document.add_table(name)
    }

    /// Write back to the bound path
    pub fn save(&self) -> OdsResult<()> {
        log::info!("Saving spreadsheet to {}", self.path.display());
        OdsWriter::write_file_with_options(&self.package, &self.path, &self.write_options)
    }

    /// Rebind to a new path (normalized to `.ods`) and save there
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> OdsResult<()> {
        self.path = with_ods_extension(path.as_ref());
        self.save()
    }

    /// The package as `.ods` bytes
    pub fn to_bytes(&self) -> OdsResult<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        OdsWriter::write_with_options(&self.package, &mut buf, &self.write_options)?;
        Ok(buf.into_inner())
    }
}

/// Append `.ods` unless the path already ends with it
fn with_ods_extension(path: &Path) -> PathBuf {
    if path.as_os_str().to_string_lossy().ends_with(ODS_EXTENSION) {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(ODS_EXTENSION);
    PathBuf::from(name)
}
