//! Dataset model: typed columns and tagged cell values.

mod dataset;
mod types;

pub use dataset::{Column, Dataset};
pub use types::{CellValue, ColumnType};
