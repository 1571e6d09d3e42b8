//! Per-cell checks: missing values and declared-type validity.

use crate::schema::{CellValue, Column, ColumnType};

use super::finding::FindingKind;

/// Trait for column checks.
pub trait Check {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// The kind this check reports.
    fn kind(&self) -> FindingKind;

    /// Return the row indices of the column that fail this check.
    fn check_column(&self, column: &Column) -> Vec<usize>;
}

/// Flags missing values, regardless of column type.
pub struct NullCheck;

impl Check for NullCheck {
    fn name(&self) -> &'static str {
        "null_check"
    }

    fn kind(&self) -> FindingKind {
        FindingKind::Null
    }

    fn check_column(&self, column: &Column) -> Vec<usize> {
        column
            .values
            .iter()
            .enumerate()
            .filter(|(_, value)| value.is_missing())
            .map(|(row_idx, _)| row_idx)
            .collect()
    }
}

/// Flags present values that don't fit the column's declared type.
pub struct TypeCheck;

impl Check for TypeCheck {
    fn name(&self) -> &'static str {
        "type_check"
    }

    fn kind(&self) -> FindingKind {
        FindingKind::TypeMismatch
    }

    fn check_column(&self, column: &Column) -> Vec<usize> {
        let mut mismatches = Vec::new();

        for (row_idx, value) in column.values.iter().enumerate() {
            if !is_valid_type(value, column.column_type) {
                mismatches.push(row_idx);
            }
        }

        mismatches
    }
}

/// Check a value against a declared column type.
///
/// Missing values always pass. Integer columns accept `Integer` values and
/// digit-only renderings, so a leading sign (`"-5"`) or decimal point
/// (`3.0`) is a mismatch. Only ASCII `0-9` count as digits: other Unicode
/// digits (`"٣"`, `"²"`) are mismatches since they don't parse as `i64`. Float columns accept anything that parses as a
/// float. Text columns accept only `Text`. Other types accept everything.
pub fn is_valid_type(value: &CellValue, column_type: ColumnType) -> bool {
    if value.is_missing() {
        return true;
    }

    match column_type {
        ColumnType::Integer => match value {
            CellValue::Integer(_) => true,
            other => is_digit_only(&other.to_string()),
        },
        ColumnType::Float => value.as_f64().is_some(),
        ColumnType::Text => matches!(value, CellValue::Text(_)),
        ColumnType::Boolean | ColumnType::Unknown => true,
    }
}

/// Non-empty and made only of ASCII digits.
fn is_digit_only(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(column_type: ColumnType, values: Vec<CellValue>) -> Column {
        Column::new("col", column_type, values)
    }

    #[test]
    fn test_null_check() {
        let col = column(
            ColumnType::Float,
            vec![
                CellValue::Float(1.0),
                CellValue::Missing,
                CellValue::Float(f64::NAN),
            ],
        );
        assert_eq!(NullCheck.check_column(&col), vec![1, 2]);
    }

    #[test]
    fn test_integer_digit_rule() {
        assert!(is_valid_type(&CellValue::Integer(-5), ColumnType::Integer));
        assert!(is_valid_type(&CellValue::text("42"), ColumnType::Integer));
        assert!(!is_valid_type(&CellValue::text("-5"), ColumnType::Integer));
        assert!(!is_valid_type(&CellValue::text("4.2"), ColumnType::Integer));
        assert!(!is_valid_type(&CellValue::text(""), ColumnType::Integer));
        assert!(!is_valid_type(&CellValue::Float(3.0), ColumnType::Integer));
    }

    #[test]
    fn test_float_rule() {
        assert!(is_valid_type(&CellValue::Integer(3), ColumnType::Float));
        assert!(is_valid_type(&CellValue::text("-1.5e3"), ColumnType::Float));
        assert!(is_valid_type(&CellValue::text(" 2.5 "), ColumnType::Float));
        assert!(!is_valid_type(&CellValue::text("abc"), ColumnType::Float));
    }

    #[test]
    fn test_text_rule() {
        assert!(is_valid_type(&CellValue::text("42"), ColumnType::Text));
        assert!(!is_valid_type(&CellValue::Integer(42), ColumnType::Text));
        assert!(!is_valid_type(&CellValue::Float(4.2), ColumnType::Text));
    }

    #[test]
    fn test_other_types_accept_everything() {
        assert!(is_valid_type(&CellValue::Integer(1), ColumnType::Boolean));
        assert!(is_valid_type(&CellValue::text("x"), ColumnType::Unknown));
    }

    #[test]
    fn test_missing_never_mismatches() {
        let col = column(ColumnType::Text, vec![CellValue::Missing, CellValue::Integer(1)]);
        assert_eq!(TypeCheck.check_column(&col), vec![1]);
    }

    #[test]
    fn test_integer_rule_ascii_digits_only() {
        assert!(is_valid_type(&CellValue::text("0042"), ColumnType::Integer));
        assert!(!is_valid_type(&CellValue::text("\u{663}"), ColumnType::Integer));
        assert!(!is_valid_type(&CellValue::text("\u{b2}"), ColumnType::Integer));
        assert!(!is_valid_type(&CellValue::text(""), ColumnType::Integer));
    }
}
