//! Validation context and the session that owns the latest one.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::atlas::Atlas;
use crate::error::Result;
use crate::input::{ExportFormat, Exporter, SourceMetadata};
use crate::report::{CellColors, ColorTable, SummaryStats};
use crate::schema::{CellValue, Dataset};
use crate::validation::{ErrorIndex, FindingSet, ValidationEngine};

/// A dataset together with everything derived from it in one validation pass.
///
/// Contexts are immutable: an edit produces a new context.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    dataset: Dataset,
    source: Option<SourceMetadata>,
    index: ErrorIndex,
    summary: SummaryStats,
    colors: ColorTable,
}

impl ValidationContext {
    /// Run a full validation pass over a dataset.
    pub fn build(dataset: Dataset, engine: &ValidationEngine) -> Self {
        let index = engine.validate(&dataset);
        let summary = SummaryStats::from_index(&index, dataset.total_cells());
        let colors = ColorTable::from_index(&index);

        debug!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            flagged_cells = summary.flagged_cells,
            total_errors = summary.total_errors,
            "validation pass complete"
        );

        Self {
            dataset,
            source: None,
            index,
            summary,
            colors,
        }
    }

    /// Attach source metadata.
    pub fn with_source(mut self, source: SourceMetadata) -> Self {
        self.source = Some(source);
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn source(&self) -> Option<&SourceMetadata> {
        self.source.as_ref()
    }

    pub fn index(&self) -> &ErrorIndex {
        &self.index
    }

    pub fn summary(&self) -> &SummaryStats {
        &self.summary
    }

    /// Findings of one cell.
    pub fn cell_findings(&self, row: usize, column: usize) -> Option<FindingSet> {
        self.index.cell(row, column)
    }

    /// Union of findings in one column.
    pub fn column_findings(&self, column: usize) -> Option<FindingSet> {
        self.index.column(column)
    }

    /// Display colors of one cell.
    pub fn color_for(&self, row: usize, column: usize) -> CellColors {
        self.colors.color_for(row, column)
    }

    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    /// Take the dataset back out of the context.
    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}

/// Holds the latest validation context and replaces it wholesale.
///
/// A failed load or edit leaves the current context untouched.
pub struct Session {
    atlas: Atlas,
    current: Option<ValidationContext>,
}

impl Session {
    pub fn new(atlas: Atlas) -> Self {
        Self {
            atlas,
            current: None,
        }
    }

    /// The last successfully validated context.
    pub fn current(&self) -> Option<&ValidationContext> {
        self.current.as_ref()
    }

    /// Load and validate a file, replacing the current context on success.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<&ValidationContext> {
        match self.atlas.analyze(path.as_ref()) {
            Ok(context) => Ok(self.current.insert(context)),
            Err(e) => {
                warn!(path = %path.as_ref().display(), error = %e, "load rejected, keeping previous dataset");
                Err(e)
            }
        }
    }

    /// Validate an in-memory dataset and make it current.
    pub fn replace(&mut self, dataset: Dataset) -> &ValidationContext {
        let context = self.atlas.validate(dataset);
        self.current.insert(context)
    }

    /// Change one cell and revalidate the whole dataset.
    ///
    /// Without a current dataset this is a no-op returning `Ok(None)`.
    pub fn edit_cell(
        &mut self,
        row: usize,
        column: usize,
        value: CellValue,
    ) -> Result<Option<&ValidationContext>> {
        let Some(current) = self.current.as_ref() else {
            return Ok(None);
        };

        let mut dataset = current.dataset().clone();
        let previous = dataset.set(row, column, value)?;
        debug!(row, column, previous = %previous, "cell edited");

        let mut context = self.atlas.validate(dataset);
        if let Some(source) = current.source() {
            context = context.with_source(source.clone());
        }

        Ok(Some(self.current.insert(context)))
    }

    /// Export the current dataset. Nothing is written without one.
    pub fn save(&self, path: impl AsRef<Path>, format: ExportFormat) -> Result<bool> {
        match &self.current {
            Some(context) => {
                Exporter::new(format).save(context.dataset(), path)?;
                Ok(true)
            }
            None => {
                info!("no dataset loaded, nothing to save");
                Ok(false)
            }
        }
    }
}
