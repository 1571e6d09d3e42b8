//! Atlas: cell-level data quality checks for tabular datasets.
//!
//! Atlas classifies every cell of a dataset against three checks (missing
//! value, type mismatch, statistical outlier), folds the findings into
//! per-column flags and summary statistics, and derives a display color for
//! every cell from its findings.
//!
//! # Core Principles
//!
//! - **Full recomputation**: every pass validates the whole snapshot
//! - **Non-destructive**: findings are never written into the data
//! - **Explicit ownership**: a [`Session`] holds the latest [`ValidationContext`]
//!
//! # Example
//!
//! ```no_run
//! use atlas::Atlas;
//!
//! let atlas = Atlas::new();
//! let context = atlas.analyze("survey.csv").unwrap();
//!
//! println!("{}", context.summary());
//! let colors = context.color_for(0, 0);
//! println!("background: {:?}", colors.background);
//! ```

pub mod error;
pub mod input;
pub mod report;
pub mod schema;
pub mod validation;

mod atlas;
mod context;

pub use crate::atlas::{Atlas, AtlasConfig};
pub use context::{Session, ValidationContext};
pub use error::{AtlasError, Result};
pub use input::{ExportFormat, Exporter, Parser, ParserConfig, SourceMetadata};
pub use report::{CellColors, ColorTable, Intensity, Rgb, SummaryStats};
pub use schema::{CellValue, Column, ColumnType, Dataset};
pub use validation::{
    CellRef, ErrorIndex, FindingKind, FindingSet, OutlierConfig, ValidationEngine,
};
