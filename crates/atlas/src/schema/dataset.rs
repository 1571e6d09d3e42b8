//! Dataset snapshot: named, typed columns of equal length.

use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, Result};

use super::types::{CellValue, ColumnType};

/// A single named column with its declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (header).
    pub name: String,
    /// Declared or inferred data type.
    pub column_type: ColumnType,
    /// Cell values in row order.
    pub values: Vec<CellValue>,
}

impl Column {
    /// Create a new column.
    pub fn new(name: impl Into<String>, column_type: ColumnType, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            column_type,
            values,
        }
    }

    /// Number of missing values in the column.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }
}

/// A rectangular, validated dataset.
///
/// Construction rejects empty data, blank headers and ragged columns, so
/// every `Dataset` the engine sees has at least one cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset from columns, validating its shape.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(AtlasError::EmptyData("No columns found".to_string()));
        }

        if let Some(column) = columns.iter().position(|c| c.name.trim().is_empty()) {
            return Err(AtlasError::MissingHeader { column });
        }

        let row_count = columns[0].values.len();
        for (index, column) in columns.iter().enumerate() {
            if column.values.len() != row_count {
                return Err(AtlasError::RaggedColumns {
                    column: index,
                    expected: row_count,
                    found: column.values.len(),
                });
            }
        }

        if row_count == 0 {
            return Err(AtlasError::EmptyData("No data rows found".to_string()));
        }

        Ok(Self { columns, row_count })
    }

    /// Build a dataset from headers, column types and row-major values.
    pub fn from_rows(
        headers: Vec<String>,
        types: Vec<ColumnType>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self> {
        if types.len() != headers.len() {
            return Err(AtlasError::Config(format!(
                "{} column types given for {} headers",
                types.len(),
                headers.len()
            )));
        }

        let mut columns: Vec<Column> = headers
            .into_iter()
            .zip(types)
            .map(|(name, column_type)| Column::new(name, column_type, Vec::with_capacity(rows.len())))
            .collect();

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(AtlasError::RaggedRow {
                    row: row_idx,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.values.push(value);
            }
        }

        Self::new(columns)
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by position.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Get a column position by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get all column names.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Rows x columns.
    pub fn total_cells(&self) -> usize {
        self.row_count * self.columns.len()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.columns.get(col).and_then(|c| c.values.get(row))
    }

    /// Iterate the values of one row in column order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = &CellValue> {
        self.columns.iter().filter_map(move |c| c.values.get(row))
    }

    /// Replace a cell value, returning the previous one.
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) -> Result<CellValue> {
        let cell = self
            .columns
            .get_mut(col)
            .and_then(|c| c.values.get_mut(row))
            .ok_or(AtlasError::CellOutOfBounds { row, column: col })?;
        Ok(std::mem::replace(cell, value))
    }
}
