//! Context types for rule execution.

use std::path::Path;

/// Extension of C header files.
pub const HEADER_EXTENSION: &str = "h";

/// Extension of C source files.
pub const SOURCE_EXTENSION: &str = "c";

/// Context provided to per-file rules.
///
/// Holds the file's content split into lines once, so every rule scans the
/// same line sequence. Lines are 0-indexed here and reported 1-indexed.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path to the file, as supplied by discovery.
    pub path: &'a Path,
    /// File contents split into lines, without line terminators.
    pub lines: Vec<&'a str>,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str) -> Self {
        Self {
            path,
            lines: content.lines().collect(),
        }
    }

    /// Returns true if the file is a C header (`.h`).
    #[must_use]
    pub fn is_header(&self) -> bool {
        has_extension(self.path, HEADER_EXTENSION)
    }

    /// Returns true if the file is a C source file (`.c`).
    #[must_use]
    pub fn is_source(&self) -> bool {
        has_extension(self.path, SOURCE_EXTENSION)
    }

    /// Number of lines in the file.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(ext)
}
