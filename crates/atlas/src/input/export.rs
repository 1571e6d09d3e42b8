//! Verbatim export of a dataset to delimited text.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AtlasError, Result};
use crate::schema::Dataset;

/// Output format for exported data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    /// Field delimiter for this format.
    pub fn delimiter(&self) -> u8 {
        match self {
            ExportFormat::Csv => b',',
            ExportFormat::Tsv => b'\t',
        }
    }

    /// Pick the format from a file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => ExportFormat::Tsv,
            _ => ExportFormat::Csv,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
        }
    }
}

/// Writes a dataset as header + rows. Findings are never embedded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exporter {
    format: ExportFormat,
}

impl Exporter {
    pub fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    /// Write the dataset to a file, creating parent directories if needed.
    pub fn save(&self, dataset: &Dataset, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| AtlasError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let file = File::create(path).map_err(|e| AtlasError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.write(dataset, BufWriter::new(file))?;

        info!(path = %path.display(), rows = dataset.row_count(), "dataset saved");
        Ok(())
    }

    /// Write the dataset to any writer.
    pub fn write<W: Write>(&self, dataset: &Dataset, writer: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.format.delimiter())
            .from_writer(writer);

        writer.write_record(dataset.headers())?;
        for row in 0..dataset.row_count() {
            writer.write_record(dataset.row(row).map(|value| value.to_string()))?;
        }

        writer.flush().map_err(|e| AtlasError::Csv(e.into()))?;
        Ok(())
    }
}
