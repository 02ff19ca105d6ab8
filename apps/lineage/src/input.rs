//! # Record Input
//!
//! Adapts tabular records to [`PersonRow`]s.
//!
//! The expected input is what a spreadsheet reader produces: a JSON array
//! with one object per row, keyed by column header. Cells may be strings,
//! numbers or `null`; empty strings count as absent.

use crate::config::ColumnNames;
use lineage_core::{LineageError, PersonRow, SourceDate, SourceId};
use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// Maximum number of rows accepted in one run.
pub const MAX_ROWS: usize = 100_000;

/// Parse a JSON array of records into rows.
pub fn rows_from_json(bytes: &[u8], columns: &ColumnNames) -> Result<Vec<PersonRow>, LineageError> {
    let records: Vec<Value> = serde_json::from_slice(bytes)
        .map_err(|e| LineageError::InvalidInput(format!("expected a JSON array of records: {}", e)))?;

    if records.len() > MAX_ROWS {
        return Err(LineageError::InvalidInput(format!(
            "Row count {} exceeds maximum allowed {}",
            records.len(),
            MAX_ROWS
        )));
    }

    records
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            let record = value.as_object().ok_or_else(|| {
                LineageError::InvalidInput(format!("row {} is not an object", idx + 1))
            })?;
            row_from_record(record, columns, idx + 1)
        })
        .collect()
}

/// Convert one record. `row_number` is 1-based and used in errors.
pub fn row_from_record(
    record: &Map<String, Value>,
    columns: &ColumnNames,
    row_number: usize,
) -> Result<PersonRow, LineageError> {
    let cell = |name: &str| record.get(name).unwrap_or(&NULL);
    let required = |name: &str| {
        record.get(name).ok_or_else(|| LineageError::MissingField {
            row: row_number,
            field: name.to_string(),
        })
    };

    let id = text_cell(required(&columns.id)?)
        .and_then(SourceId::new)
        .ok_or_else(|| LineageError::MissingField {
            row: row_number,
            field: columns.id.clone(),
        })?;

    let mut row = PersonRow::new(
        id,
        text_cell(required(&columns.first_name)?).unwrap_or_default(),
        text_cell(required(&columns.last_name)?).unwrap_or_default(),
    );
    row.father_id = text_cell(cell(&columns.father_id)).and_then(SourceId::new);
    row.mother_id = text_cell(cell(&columns.mother_id)).and_then(SourceId::new);
    row.title = text_cell(cell(&columns.title));
    row.middle_name = text_cell(cell(&columns.middle_name));
    row.nickname = text_cell(cell(&columns.nickname));
    row.sex_code = integer_cell(cell(&columns.sex));
    row.email = text_cell(cell(&columns.email));
    row.webpage = text_cell(cell(&columns.webpage));
    row.birth_date = date_cell(cell(&columns.birth_date));
    row.birth_place = text_cell(cell(&columns.birth_place));
    row.death_date = date_cell(cell(&columns.death_date));
    row.death_place = text_cell(cell(&columns.death_place));
    row.living = integer_cell(cell(&columns.living));
    Ok(row)
}

/// Text of a cell; `None` for null, empty or whitespace-only cells.
fn text_cell(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => integer_of(n).map_or_else(|| n.to_string(), |i| i.to_string()),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    };
    if text.is_empty() { None } else { Some(text) }
}

/// Integer value of a cell. Spreadsheets often hand out `1.0` for `1`.
fn integer_cell(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => integer_of(n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn integer_of(n: &serde_json::Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        let text = n.to_string();
        text.strip_suffix(".0").and_then(|t| t.parse().ok())
    })
}

/// A numeric cell is a bare year; text is kept for the date formatter.
fn date_cell(value: &Value) -> Option<SourceDate> {
    match value {
        Value::Number(n) => Some(match integer_of(n) {
            Some(year) => SourceDate::Year(year),
            None => SourceDate::Text(n.to_string()),
        }),
        other => text_cell(other).map(SourceDate::Text),
    }
}
