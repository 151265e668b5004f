//! # fixedcols
//!
//! Turns fixed-width text records into typed columns.
//!
//! Each record is a line of exactly the schema's total width, with fields at
//! fixed byte offsets and no delimiters. Runs of CR/LF between records are
//! ignored. Parsing yields one typed column per field, or the first failure
//! with its record and field location.
//!
//! ## Overview
//!
//! - **Schema**: ordered (type, width) fields; see [`Schema`]
//! - **Scanner**: splits the buffer into record slices; see [`scan_lines`]
//! - **Engine**: parses every field into its column; see [`parse`]
//! - **Reader**: loads a whole file; see [`read_whole_file`]
//!
//! ## Example
//!
//! ```
//! use fixedcols::{ElementType, FieldSpec, Schema, parse};
//!
//! // Record layout: Id(3) Code(4)
//! let schema = Schema::new(vec![
//!     FieldSpec::new(ElementType::Int32, 3),
//!     FieldSpec::new(ElementType::String, 4),
//! ]);
//!
//! let parsed = parse(b"123abcd\n456wxyz\n", &schema).unwrap();
//!
//! assert_eq!(parsed.rows(), 2);
//! assert_eq!(parsed.column(0).unwrap().as_i32(), Some(&[123, 456][..]));
//! ```

use std::path::Path;

pub mod column;
pub mod engine;
pub mod error;
pub mod field;
pub mod reader;
pub mod scanner;
pub mod schema;

pub use column::{Column, ColumnSet, Value};
pub use engine::{Parsed, parse, parse_lines};
pub use error::{Error, LayoutError, ParseError, ReadError};
pub use field::{FieldError, ParseNumber};
pub use reader::{RawBuffer, read_whole_file};
pub use scanner::{LineIndex, scan_lines};
pub use schema::{ElementType, FieldSpec, Schema};

/// Read the file at `path` and parse it with `schema`.
///
/// The schema is checked before the file is opened.
pub fn parse_file(path: impl AsRef<Path>, schema: &Schema) -> Result<Parsed, Error> {
    schema.validate()?;
    let buffer = read_whole_file(path)?;
    Ok(parse(&buffer, schema)?)
}
