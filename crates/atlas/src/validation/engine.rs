//! Composite engine that runs every check over a dataset.

use tracing::debug;

use crate::schema::Dataset;

use super::checks::{Check, NullCheck, TypeCheck};
use super::index::{CellRef, ErrorIndex};
use super::outlier::{OutlierCheck, OutlierConfig};

/// Runs the null, type and outlier checks and folds their results into an
/// [`ErrorIndex`].
pub struct ValidationEngine {
    checks: Vec<Box<dyn Check>>,
}

impl ValidationEngine {
    /// Create an engine with the default outlier configuration.
    pub fn new() -> Self {
        Self::with_outlier_config(OutlierConfig::default())
    }

    /// Create an engine with a custom outlier configuration.
    pub fn with_outlier_config(config: OutlierConfig) -> Self {
        Self {
            checks: vec![
                Box::new(NullCheck),
                Box::new(TypeCheck),
                Box::new(OutlierCheck::new(config)),
            ],
        }
    }

    /// Run all checks over the full dataset.
    pub fn validate(&self, dataset: &Dataset) -> ErrorIndex {
        let mut index = ErrorIndex::new();

        for (col_idx, column) in dataset.columns().iter().enumerate() {
            for check in &self.checks {
                let rows = check.check_column(column);
                if !rows.is_empty() {
                    debug!(
                        check = check.name(),
                        column = %column.name,
                        flagged = rows.len(),
                        "check flagged cells"
                    );
                }
                for row in rows {
                    index.record(CellRef::new(row, col_idx), check.kind());
                }
            }
        }

        index.finish()
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CellValue, Column, ColumnType};
    use crate::validation::FindingKind;

    fn dataset() -> Dataset {
        let mut ages: Vec<CellValue> = (0..20).map(|i| CellValue::Integer(30 + i % 5)).collect();
        ages.push(CellValue::Integer(900));
        ages.push(CellValue::Missing);

        let mut names: Vec<CellValue> = (0..22).map(|i| CellValue::text(format!("p{}", i))).collect();
        names[3] = CellValue::Integer(42);

        Dataset::new(vec![
            Column::new("age", ColumnType::Integer, ages),
            Column::new("name", ColumnType::Text, names),
        ])
        .unwrap()
    }

    #[test]
    fn test_engine_combines_checks() {
        let index = ValidationEngine::new().validate(&dataset());

        assert_eq!(index.cell(20, 0), Some(FindingKind::Outlier.into()));
        assert_eq!(index.cell(21, 0), Some(FindingKind::Null.into()));
        assert_eq!(index.cell(3, 1), Some(FindingKind::TypeMismatch.into()));
        assert_eq!(index.flagged_cell_count(), 3);

        let age = index.column(0).unwrap();
        assert!(age.contains(FindingKind::Null));
        assert!(age.contains(FindingKind::Outlier));
        assert!(!age.contains(FindingKind::TypeMismatch));
    }

    #[test]
    fn test_wider_threshold_drops_outlier() {
        let engine =
            ValidationEngine::with_outlier_config(OutlierConfig::default().with_sigma_threshold(10.0));
        let index = engine.validate(&dataset());
        assert_eq!(index.count(FindingKind::Outlier), 0);
    }
}
