use calamine::Data;
use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// Floats with a magnitude below this are rendered as integers when they
/// carry no fractional part
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER).then_some(f as i64)
}

/// True for cells that carry no usable value: empty cells, empty strings and
/// error cells (`#N/A`, `#DIV/0!`, ...)
pub fn is_missing(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Render a cell the way it is written to extraction files
///
/// Empty cells become `""`. Whole numbers drop the fractional part since
/// spreadsheets store every number as a float.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => match integral(*f) {
            Some(i) => i.to_string(),
            None => f.to_string(),
        },
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => format_datetime(ndt),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

/// Convert a cell to a JSON scalar, or `None` if the cell is missing
pub fn cell_to_json(cell: &Data) -> Option<JsonValue> {
    if is_missing(cell) {
        return None;
    }
    let value = match cell {
        Data::Int(i) => JsonValue::from(*i),
        Data::Float(f) => match integral(*f) {
            Some(i) => JsonValue::from(i),
            None => JsonValue::from(*f),
        },
        Data::Bool(b) => JsonValue::Bool(*b),
        Data::String(s) => JsonValue::String(s.clone()),
        other => JsonValue::String(cell_to_string(other)),
    };
    Some(value)
}

/// Numeric value of a cell, if it holds a plain number
pub fn cell_to_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        _ => None,
    }
}
