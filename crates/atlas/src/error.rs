//! Error types for the Atlas library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Atlas operations.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to validate.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A column has no header name.
    #[error("Missing header for column {column}")]
    MissingHeader { column: usize },

    /// Columns of a dataset have different lengths.
    #[error("Column {column} has {found} values, expected {expected}")]
    RaggedColumns {
        column: usize,
        expected: usize,
        found: usize,
    },

    /// A row has a different number of values than there are headers.
    #[error("Row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// An edit addressed a cell outside the dataset.
    #[error("Cell ({row}, {column}) is out of bounds")]
    CellOutOfBounds { row: usize, column: usize },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AtlasError {
    /// Whether this error rejected a dataset before it reached the engine.
    pub fn is_load_rejection(&self) -> bool {
        matches!(
            self,
            AtlasError::EmptyData(_)
                | AtlasError::MissingHeader { .. }
                | AtlasError::RaggedColumns { .. }
                | AtlasError::RaggedRow { .. }
        )
    }
}

/// Result type alias for Atlas operations.
pub type Result<T> = std::result::Result<T, AtlasError>;
