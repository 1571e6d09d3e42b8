//! Validation engine for detecting cell-level data quality issues.

mod checks;
mod engine;
mod finding;
mod index;
mod outlier;

pub use checks::{is_valid_type, Check, NullCheck, TypeCheck};
pub use engine::ValidationEngine;
pub use finding::{FindingKind, FindingSet};
pub use index::{CellRef, ErrorIndex, FlaggedCell};
pub use outlier::{ColumnMoments, OutlierCheck, OutlierConfig};
