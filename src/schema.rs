//! Field schema: element types, fixed byte widths and the layout text format.
//!
//! Layout format (one field per line):
//! ```text
//! # id, name, score
//! INT32    6  id
//! STRING   7  name
//! FLOAT64  9  score
//! ```
//!
//! - `TYPE WIDTH [NAME]`, separated by whitespace
//! - Type names are case-insensitive: `INT8`/`I8`, `INT16`/`I16`,
//!   `INT32`/`I32`, `INT64`/`I64`/`INT`, `FLOAT32`/`F32`,
//!   `FLOAT64`/`F64`/`FLOAT`, `STRING`/`STR`
//! - Blank lines and lines starting with `#` are skipped

use std::fmt;
use std::str::FromStr;

use crate::error::{LayoutError, ParseError};

/// Element type of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
}

impl ElementType {
    /// Canonical upper-case name, as written in layout files.
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Int8 => "INT8",
            ElementType::Int16 => "INT16",
            ElementType::Int32 => "INT32",
            ElementType::Int64 => "INT64",
            ElementType::Float32 => "FLOAT32",
            ElementType::Float64 => "FLOAT64",
            ElementType::String => "STRING",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INT8" | "I8" => Ok(ElementType::Int8),
            "INT16" | "I16" => Ok(ElementType::Int16),
            "INT32" | "I32" => Ok(ElementType::Int32),
            "INT64" | "I64" | "INT" => Ok(ElementType::Int64),
            "FLOAT32" | "F32" => Ok(ElementType::Float32),
            "FLOAT64" | "F64" | "FLOAT" => Ok(ElementType::Float64),
            "STRING" | "STR" => Ok(ElementType::String),
            _ => Err(format!("Unknown element type: {s}")),
        }
    }
}

/// One column: its element type, its byte width and an optional name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub ty: ElementType,
    pub width: usize,
    pub name: Option<String>,
}

impl FieldSpec {
    pub fn new(ty: ElementType, width: usize) -> Self {
        Self {
            ty,
            width,
            name: None,
        }
    }

    pub fn named(name: impl Into<String>, ty: ElementType, width: usize) -> Self {
        Self {
            ty,
            width,
            name: Some(name.into()),
        }
    }
}

impl FromStr for FieldSpec {
    type Err = String;

    /// Compact form `TYPE:WIDTH[:NAME]`, e.g. `i32:6:id`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let ty: ElementType = parts.next().unwrap_or("").trim().parse()?;
        let width = parts
            .next()
            .ok_or_else(|| format!("Field '{s}' requires TYPE:WIDTH"))?;
        let width: usize = width
            .trim()
            .parse()
            .map_err(|_| format!("Invalid width in '{s}'"))?;
        let name = parts
            .next()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        Ok(Self { ty, width, name })
    }
}

/// Ordered field layout of one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total record width, failing on a degenerate schema.
    ///
    /// Zero-width fields are fine individually as long as the sum is not zero.
    pub fn validate(&self) -> Result<usize, ParseError> {
        let total = self
            .fields
            .iter()
            .try_fold(0usize, |acc, f| acc.checked_add(f.width))
            .ok_or(ParseError::WidthOverflow)?;
        if total == 0 {
            return Err(ParseError::ZeroLineWidth);
        }
        Ok(total)
    }

    /// Name of field `index`, falling back to `field{index}` when unnamed.
    pub fn field_name(&self, index: usize) -> String {
        match self.fields.get(index).and_then(|f| f.name.as_deref()) {
            Some(name) => name.to_string(),
            None => format!("field{index}"),
        }
    }

    /// Parse layout text into a schema.
    pub fn from_layout(text: &str) -> Result<Self, LayoutError> {
        let mut fields = Vec::new();

        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let field = parse_layout_line(line).map_err(|e| LayoutError::new(line_num + 1, e))?;
            fields.push(field);
        }

        if fields.is_empty() {
            return Err(LayoutError::new(0, "Layout has no fields"));
        }

        Ok(Self { fields })
    }
}

impl FromIterator<FieldSpec> for Schema {
    fn from_iter<I: IntoIterator<Item = FieldSpec>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Parse a single `TYPE WIDTH [NAME]` line.
fn parse_layout_line(line: &str) -> Result<FieldSpec, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(format!("Expected TYPE WIDTH [NAME], got '{line}'"));
    }

    let ty: ElementType = parts[0].parse()?;
    let width: usize = parts[1]
        .parse()
        .map_err(|_| format!("Invalid width: {}", parts[1]))?;
    let name = parts.get(2).map(|n| n.to_string());

    Ok(FieldSpec { ty, width, name })
}
