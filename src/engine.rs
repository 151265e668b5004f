//! Parse engine: runs the field parsers over every (row, field) pair.
//!
//! Rows are visited in order and fields in schema order. Each field is the
//! `width`-byte slice at the current cursor; the input is never modified.
//! The first failure stops the parse and is returned with its location.

use crate::column::{Column, ColumnSet, Value};
use crate::error::ParseError;
use crate::field::{FieldError, ParseNumber, copy_string};
use crate::scanner::{LineIndex, scan_lines};
use crate::schema::Schema;

/// Successfully parsed columns plus the row count.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    schema: Schema,
    columns: ColumnSet,
    rows: usize,
}

impl Parsed {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Column of the first field named `name`.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        let index = self
            .schema
            .fields()
            .iter()
            .position(|f| f.name.as_deref() == Some(name))?;
        self.columns.get(index)
    }

    /// All cells of row `row`, in schema order.
    pub fn row(&self, row: usize) -> Option<Vec<Value<'_>>> {
        if row >= self.rows {
            return None;
        }
        let columns = self.columns.columns();
        columns.iter().map(|c| c.value(row)).collect()
    }

    /// Columns keyed by field name, in schema order.
    ///
    /// Unnamed fields are keyed `field{index}`.
    pub fn into_named(self) -> Vec<(String, Column)> {
        let names: Vec<String> = (0..self.schema.len())
            .map(|i| self.schema.field_name(i))
            .collect();
        names.into_iter().zip(self.columns.into_columns()).collect()
    }

    pub fn into_columns(self) -> ColumnSet {
        self.columns
    }
}

#[inline]
fn store<T: ParseNumber>(values: &mut [T], row: usize, raw: &[u8]) -> Result<(), FieldError> {
    values[row] = T::parse_field(raw)?;
    Ok(())
}

/// Parse `raw` as the column's element type into slot `row`.
fn parse_into(column: &mut Column, row: usize, raw: &[u8]) -> Result<(), FieldError> {
    match column {
        Column::Int8(values) => store(values, row, raw),
        Column::Int16(values) => store(values, row, raw),
        Column::Int32(values) => store(values, row, raw),
        Column::Int64(values) => store(values, row, raw),
        Column::Float32(values) => store(values, row, raw),
        Column::Float64(values) => store(values, row, raw),
        Column::String(values) => {
            values[row] = copy_string(raw)?;
            Ok(())
        }
    }
}

/// Every column must have the field's element type and exactly `rows` slots.
fn check_shape(schema: &Schema, columns: &ColumnSet, rows: usize) -> Result<(), ParseError> {
    if columns.len() != schema.len() {
        return Err(ParseError::ColumnMismatch {
            field: columns.len().min(schema.len()),
        });
    }
    for (field, (spec, column)) in schema.fields().iter().zip(columns.columns()).enumerate() {
        if column.element_type() != spec.ty || column.len() != rows {
            return Err(ParseError::ColumnMismatch { field });
        }
    }
    Ok(())
}

/// Fill pre-allocated `columns` from the scanned `lines`.
///
/// `columns` must have been allocated for `schema` with `lines.len()` rows,
/// otherwise `ColumnMismatch` is returned before anything is written. A line
/// whose length is not the schema's total width fails with `BadLine`.
/// On a conversion failure the columns are partially written and must be
/// discarded.
pub fn parse_lines(
    lines: &LineIndex<'_>,
    schema: &Schema,
    columns: &mut ColumnSet,
) -> Result<(), ParseError> {
    let width = schema.validate()?;
    check_shape(schema, columns, lines.len())?;

    let fields = schema.fields();
    let columns = columns.columns_mut();

    for (row, line) in lines.iter().enumerate() {
        if line.len() != width {
            return Err(ParseError::BadLine {
                line: row,
                length: line.len(),
                expected: width,
            });
        }

        let mut cursor = 0;
        for (index, (spec, column)) in fields.iter().zip(columns.iter_mut()).enumerate() {
            let raw = &line[cursor..cursor + spec.width];
            parse_into(column, row, raw).map_err(|e| match e {
                FieldError::OutOfMemory => ParseError::OutOfMemory,
                FieldError::Trailing { .. } | FieldError::Overflow => ParseError::FailedToParse {
                    line: row,
                    field: index,
                },
            })?;
            cursor += spec.width;
        }
    }

    Ok(())
}

/// Parse a whole buffer of fixed-width records into typed columns.
pub fn parse(buffer: &[u8], schema: &Schema) -> Result<Parsed, ParseError> {
    let width = schema.validate()?;
    let lines = scan_lines(buffer, width)?;
    let rows = lines.len();
    let mut columns = ColumnSet::allocate(schema, rows)?;
    parse_lines(&lines, schema, &mut columns)?;

    Ok(Parsed {
        schema: schema.clone(),
        columns,
        rows,
    })
}
