//! Error types for schema validation, scanning, parsing and file reading.
//!
//! Every failure is a value returned to the caller. The library never logs;
//! the error payload carries the kind and, where it applies, the record and
//! field location needed to build a diagnostic.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while turning a raw buffer into columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The schema's widths sum to zero, so no line can ever match.
    #[error("schema has zero total line width")]
    ZeroLineWidth,

    /// The schema's widths do not fit in `usize`.
    #[error("schema total line width overflows")]
    WidthOverflow,

    /// A physical record's length does not match the schema's total width.
    ///
    /// `line` is the index of the record being formed, i.e. the number of
    /// well-formed records seen before it.
    #[error("bad line {line}: length {length}, expected {expected}")]
    BadLine {
        line: usize,
        length: usize,
        expected: usize,
    },

    /// A field failed numeric conversion or had trailing garbage.
    #[error("failed to parse line {line}, field {field}")]
    FailedToParse { line: usize, field: usize },

    /// A pre-allocated column set does not fit the schema and row count.
    ///
    /// `field` is the first field whose column is missing, of the wrong
    /// element type, or of the wrong length.
    #[error("column set does not match schema at field {field}")]
    ColumnMismatch { field: usize },

    /// An allocation for the line index, a column or a string cell failed.
    #[error("out of memory")]
    OutOfMemory,
}

/// Failure while loading a whole file into memory.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// Any other I/O failure; `code` is the OS error number when one exists.
    #[error("I/O error reading {} (os error {code:?}): {source}", .path.display())]
    Io {
        path: PathBuf,
        code: Option<i32>,
        #[source]
        source: io::Error,
    },

    /// The file cannot be held in memory on this platform.
    #[error("out of memory reading {}", .path.display())]
    OutOfMemory { path: PathBuf },
}

impl ReadError {
    pub(crate) fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => ReadError::FileNotFound { path },
            io::ErrorKind::OutOfMemory => ReadError::OutOfMemory { path },
            _ => ReadError::Io {
                path,
                code: source.raw_os_error(),
                source,
            },
        }
    }
}

/// Failure in the layout text format.
///
/// `line` is 1-based, matching what an editor shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("layout line {line}: {message}")]
pub struct LayoutError {
    pub line: usize,
    pub message: String,
}

impl LayoutError {
    pub(crate) fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Any failure from [`crate::parse_file`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
