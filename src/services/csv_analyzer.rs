use polars::prelude::*;
use serde_json::{Map, Number, Value};
use std::path::Path;

use crate::error::AppError;
use crate::models::CsvSummary;

const SAMPLE_ROWS: usize = 3;

/// Loads a CSV file and summarizes its shape: header columns, data row
/// count, and the first few rows rendered as JSON objects.
pub fn analyze_csv(path: &Path) -> Result<CsvSummary, AppError> {
    let df = CsvReader::from_path(path)
        .map_err(|e| AppError::ParseError(format!("Failed to open CSV file: {}", e)))?
        .has_header(true)
        .finish()
        .map_err(|e| AppError::ParseError(format!("Failed to parse CSV file: {}", e)))?;

    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let num_rows = df.height();
    let num_columns = columns.len();

    let mut sample_rows = Vec::with_capacity(num_rows.min(SAMPLE_ROWS));
    for row_idx in 0..num_rows.min(SAMPLE_ROWS) {
        let mut row = Map::new();
        for series in df.get_columns() {
            let value = series.get(row_idx).map_err(|e| {
                AppError::Internal(format!("Failed to read row {}: {}", row_idx, e))
            })?;
            row.insert(series.name().to_string(), any_value_to_json(&value));
        }
        sample_rows.push(Value::Object(row));
    }

    tracing::debug!(
        "Analyzed CSV {:?}: {} rows x {} columns",
        path,
        num_rows,
        num_columns
    );

    Ok(CsvSummary {
        columns,
        sample_rows,
        num_rows,
        num_columns,
    })
}

fn any_value_to_json(value: &AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(*b),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        AnyValue::Int8(v) => Value::Number((*v).into()),
        AnyValue::Int16(v) => Value::Number((*v).into()),
        AnyValue::Int32(v) => Value::Number((*v).into()),
        AnyValue::Int64(v) => Value::Number((*v).into()),
        AnyValue::UInt8(v) => Value::Number((*v).into()),
        AnyValue::UInt16(v) => Value::Number((*v).into()),
        AnyValue::UInt32(v) => Value::Number((*v).into()),
        AnyValue::UInt64(v) => Value::Number((*v).into()),
        AnyValue::Float32(v) => float_to_json(*v as f64),
        AnyValue::Float64(v) => float_to_json(*v),
        other => Value::String(other.to_string()),
    }
}

fn float_to_json(v: f64) -> Value {
    if v.is_finite() {
        Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
    } else {
        Value::Null
    }
}
