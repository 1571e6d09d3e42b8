//! Core type definitions for column and cell representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared or inferred data type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers (no decimal point).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Text/string values.
    Text,
    /// Boolean values (true/false).
    Boolean,
    /// Unable to determine type.
    #[default]
    Unknown,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Short label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
            ColumnType::Unknown => "unknown",
        }
    }
}

/// A single cell value, tagged with its runtime kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Absent data.
    #[default]
    Missing,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Create a text value.
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Returns true if the value represents absent data.
    ///
    /// A NaN float counts as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Coerce the value to a float, if it has a numeric reading.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Missing => None,
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(f) if f.is_nan() => None,
            CellValue::Float(f) => Some(*f),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|f| !f.is_nan()),
        }
    }

    /// Returns the text payload for `Text` values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", format_float(*v)),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Missing)
    }
}

/// Render a float so that whole numbers keep a decimal point (`3.0`, not `3`).
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    let rendered = value.to_string();
    if value.is_finite() && !rendered.contains('.') {
        format!("{}.0", rendered)
    } else {
        rendered
    }
}
