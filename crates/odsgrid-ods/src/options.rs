//! ODS options

/// Options for reading ODS packages
#[derive(Debug, Clone, Default)]
pub struct OdsReadOptions {
    /// Reject packages whose `mimetype` entry is missing or is not the
    /// spreadsheet media type (default: only log a warning)
    pub strict_mimetype: bool,
}

/// Options for writing ODS packages
#[derive(Debug, Clone)]
pub struct OdsWriteOptions {
    /// Deflate the XML parts (default: true). The `mimetype` entry is always
    /// stored uncompressed.
    pub compress: bool,
    /// Generator string written to a generated `meta.xml`
    pub generator: String,
}

impl Default for OdsWriteOptions {
    fn default() -> Self {
        Self {
            compress: true,
            generator: format!("odsgrid/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
