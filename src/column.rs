//! Typed column storage and the output allocator.
//!
//! Each `Column` variant owns its values; the variant always matches the
//! element type of the field it was allocated for.

use std::borrow::Cow;
use std::fmt;

use crate::error::ParseError;
use crate::schema::{ElementType, Schema};

/// One field's values across all parsed rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    /// One independently owned byte vector per row.
    String(Vec<Vec<u8>>),
}

/// Reserve exactly `rows` slots and fill them with `fill`.
fn allocate_filled<T: Clone>(rows: usize, fill: T) -> Result<Vec<T>, ParseError> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(rows)
        .map_err(|_| ParseError::OutOfMemory)?;
    values.resize(rows, fill);
    Ok(values)
}

macro_rules! accessor {
    ($name:ident, $variant:ident, $ty:ty) => {
        pub fn $name(&self) -> Option<&[$ty]> {
            match self {
                Column::$variant(values) => Some(values.as_slice()),
                _ => None,
            }
        }
    };
}

impl Column {
    /// Allocate a column of `rows` slots for `ty`.
    ///
    /// Numeric slots start at zero; string slots start empty and do not
    /// allocate until the engine fills them.
    pub fn allocate(ty: ElementType, rows: usize) -> Result<Self, ParseError> {
        Ok(match ty {
            ElementType::Int8 => Column::Int8(allocate_filled(rows, 0)?),
            ElementType::Int16 => Column::Int16(allocate_filled(rows, 0)?),
            ElementType::Int32 => Column::Int32(allocate_filled(rows, 0)?),
            ElementType::Int64 => Column::Int64(allocate_filled(rows, 0)?),
            ElementType::Float32 => Column::Float32(allocate_filled(rows, 0.0)?),
            ElementType::Float64 => Column::Float64(allocate_filled(rows, 0.0)?),
            ElementType::String => Column::String(allocate_filled(rows, Vec::new())?),
        })
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            Column::Int8(_) => ElementType::Int8,
            Column::Int16(_) => ElementType::Int16,
            Column::Int32(_) => ElementType::Int32,
            Column::Int64(_) => ElementType::Int64,
            Column::Float32(_) => ElementType::Float32,
            Column::Float64(_) => ElementType::Float64,
            Column::String(_) => ElementType::String,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Int8(v) => v.len(),
            Column::Int16(v) => v.len(),
            Column::Int32(v) => v.len(),
            Column::Int64(v) => v.len(),
            Column::Float32(v) => v.len(),
            Column::Float64(v) => v.len(),
            Column::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    accessor!(as_i8, Int8, i8);
    accessor!(as_i16, Int16, i16);
    accessor!(as_i32, Int32, i32);
    accessor!(as_i64, Int64, i64);
    accessor!(as_f32, Float32, f32);
    accessor!(as_f64, Float64, f64);
    accessor!(as_strings, String, Vec<u8>);

    /// Value at `row`, widened for display.
    pub fn value(&self, row: usize) -> Option<Value<'_>> {
        match self {
            Column::Int8(v) => v.get(row).map(|&x| Value::Int(i64::from(x))),
            Column::Int16(v) => v.get(row).map(|&x| Value::Int(i64::from(x))),
            Column::Int32(v) => v.get(row).map(|&x| Value::Int(i64::from(x))),
            Column::Int64(v) => v.get(row).map(|&x| Value::Int(x)),
            Column::Float32(v) => v.get(row).map(|&x| Value::Float(f64::from(x))),
            Column::Float64(v) => v.get(row).map(|&x| Value::Float(x)),
            Column::String(v) => v.get(row).map(|s| Value::Str(s.as_slice())),
        }
    }
}

/// A single cell borrowed from a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Int(i64),
    Float(f64),
    Str(&'a [u8]),
}

impl Value<'_> {
    /// String cell as text; invalid UTF-8 is replaced, not rejected.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Str(bytes) => Some(String::from_utf8_lossy(bytes)),
            _ => None,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:.6}"),
            Value::Str(bytes) => write!(f, "\"{}\"", String::from_utf8_lossy(bytes)),
        }
    }
}

/// One column per schema field, all of the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    /// Allocate one column per field, each holding `rows` slots.
    ///
    /// On failure, columns already allocated are dropped with the partial set.
    pub fn allocate(schema: &Schema, rows: usize) -> Result<Self, ParseError> {
        let mut columns = Vec::new();
        columns
            .try_reserve_exact(schema.len())
            .map_err(|_| ParseError::OutOfMemory)?;
        for field in schema.fields() {
            columns.push(Column::allocate(field.ty, rows)?);
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSpec;

    #[test]
    fn test_allocate_matches_schema() {
        let schema = Schema::new(vec![
            FieldSpec::new(ElementType::Int8, 2),
            FieldSpec::new(ElementType::Float32, 5),
            FieldSpec::new(ElementType::String, 3),
        ]);
        let set = ColumnSet::allocate(&schema, 4).unwrap();
        assert_eq!(set.len(), 3);
        for (column, field) in set.columns().iter().zip(schema.fields()) {
            assert_eq!(column.element_type(), field.ty);
            assert_eq!(column.len(), 4);
        }
        assert_eq!(set.get(0).unwrap().as_i8(), Some(&[0i8; 4][..]));
        let strings = set.get(2).unwrap().as_strings().unwrap();
        assert!(strings.iter().all(Vec::is_empty));
    }

    #[test]
    fn test_allocate_zero_rows() {
        let schema = Schema::new(vec![FieldSpec::new(ElementType::Int64, 4)]);
        let set = ColumnSet::allocate(&schema, 0).unwrap();
        assert!(set.get(0).unwrap().is_empty());
    }

    #[test]
    fn test_allocate_too_large() {
        let err = Column::allocate(ElementType::Int64, usize::MAX).unwrap_err();
        assert_eq!(err, ParseError::OutOfMemory);
    }

    #[test]
    fn test_typed_accessors() {
        let column = Column::Int32(vec![1, 2]);
        assert_eq!(column.as_i32(), Some(&[1, 2][..]));
        assert_eq!(column.as_i64(), None);
        assert_eq!(column.as_strings(), None);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Int(-5).to_string(), "-5");
        assert_eq!(Value::Float(0.25).to_string(), "0.250000");
        assert_eq!(Value::Str(b"abc").to_string(), "\"abc\"");
    }

    #[test]
    fn test_value_widening() {
        let column = Column::Float32(vec![1.5]);
        assert_eq!(column.value(0), Some(Value::Float(1.5)));
        assert_eq!(column.value(1), None);

        let column = Column::String(vec![b"xy".to_vec()]);
        assert_eq!(column.value(0).unwrap().as_text().unwrap(), "xy");
    }
}
