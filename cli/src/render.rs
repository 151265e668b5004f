//! Text and JSON rendering of parsed columns.

use fixedcols::{Column, Parsed};
use serde_json::{Map, Value as Json};

/// One line per row, cells separated by `", "`.
///
/// Integers print plainly, floats with six decimals, strings quoted.
pub fn render_rows(parsed: &Parsed) -> String {
    (0..parsed.rows())
        .filter_map(|r| parsed.row(r))
        .map(|cells| {
            cells
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn column_to_json(column: &Column) -> Json {
    match column {
        Column::Int8(v) => v.iter().map(|&x| Json::from(x)).collect(),
        Column::Int16(v) => v.iter().map(|&x| Json::from(x)).collect(),
        Column::Int32(v) => v.iter().map(|&x| Json::from(x)).collect(),
        Column::Int64(v) => v.iter().map(|&x| Json::from(x)).collect(),
        Column::Float32(v) => v.iter().map(|&x| Json::from(f64::from(x))).collect(),
        Column::Float64(v) => v.iter().map(|&x| Json::from(x)).collect(),
        Column::String(v) => v
            .iter()
            .map(|s| Json::from(String::from_utf8_lossy(s).into_owned()))
            .collect(),
    }
}

/// A JSON object mapping each field name to its array of values.
///
/// Non-finite floats become `null`.
pub fn render_json(parsed: &Parsed) -> String {
    let mut object = Map::new();
    for (index, column) in parsed.columns().columns().iter().enumerate() {
        object.insert(parsed.schema().field_name(index), column_to_json(column));
    }
    Json::Object(object).to_string()
}
