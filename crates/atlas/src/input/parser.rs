//! CSV/TSV loader with delimiter detection and column type inference.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{AtlasError, Result};
use crate::schema::{CellValue, Column, ColumnType, Dataset};

use super::source::SourceMetadata;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Strings read as missing values (exact match).
static NA_VALUES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
        "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    ]
    .into_iter()
    .collect()
});

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = `.tsv` extension or auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Loads delimited text files into validated datasets.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the dataset and its source metadata.
    ///
    /// Empty files, files without data rows and blank headers are rejected.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| AtlasError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| AtlasError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let is_tsv = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("tsv"))
            .unwrap_or(false);
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None if is_tsv => b'\t',
            None => detect_delimiter(&contents)?,
        };
        debug!(path = %path.display(), delimiter = ?(delimiter as char), "parsing");

        let dataset = self.parse_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            dataset.row_count(),
            dataset.column_count(),
        );

        info!(
            file = %source.file,
            rows = source.row_count,
            columns = source.column_count,
            "loaded dataset"
        );

        Ok((dataset, source))
    }

    /// Parse bytes with a known delimiter.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

        if headers.is_empty() {
            return Err(AtlasError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); expected_cols];

        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            if record.len() > expected_cols {
                return Err(AtlasError::RaggedRow {
                    row: row_idx,
                    expected: expected_cols,
                    found: record.len(),
                });
            }
            // Short rows are padded with missing values.
            for (col_idx, column) in raw_columns.iter_mut().enumerate() {
                column.push(record.get(col_idx).unwrap_or("").to_string());
            }
        }

        let columns = headers
            .into_iter()
            .zip(raw_columns)
            .map(|(name, raw)| infer_column(name, raw))
            .collect();

        Dataset::new(columns)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a raw field is one of the missing-value sentinels.
pub fn is_na_value(value: &str) -> bool {
    NA_VALUES.contains(value)
}

/// Infer a column's type from its raw fields and convert them to cell values.
///
/// Integers with gaps become floats; booleans need every value present.
fn infer_column(name: String, raw: Vec<String>) -> Column {
    let present: Vec<&str> = raw
        .iter()
        .map(|s| s.as_str())
        .filter(|s| !is_na_value(s))
        .collect();
    let has_missing = present.len() < raw.len();

    let all_int = present.iter().all(|v| v.trim().parse::<i64>().is_ok());
    let all_float = present.iter().all(|v| v.trim().parse::<f64>().is_ok());
    let all_bool = present.iter().all(|v| {
        v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("false")
    });

    let column_type = if present.is_empty() {
        ColumnType::Float
    } else if all_int && !has_missing {
        ColumnType::Integer
    } else if all_float {
        ColumnType::Float
    } else if all_bool && !has_missing {
        ColumnType::Boolean
    } else {
        ColumnType::Text
    };

    let values = raw
        .into_iter()
        .map(|value| {
            if is_na_value(&value) {
                return CellValue::Missing;
            }
            match column_type {
                ColumnType::Integer => value
                    .trim()
                    .parse::<i64>()
                    .map(CellValue::Integer)
                    .unwrap_or(CellValue::Text(value)),
                ColumnType::Float => value
                    .trim()
                    .parse::<f64>()
                    .map(CellValue::Float)
                    .unwrap_or(CellValue::Text(value)),
                _ => CellValue::Text(value),
            }
        })
        .collect();

    Column::new(name, column_type, values)
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(AtlasError::EmptyData("File contains no data".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Same count on every line beats a higher but ragged count.
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
