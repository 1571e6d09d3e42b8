//! Error index: per-cell findings and their per-column unions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::finding::{FindingKind, FindingSet};

/// Position of a cell. Orders row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub column: usize,
}

impl CellRef {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// A flagged cell with its findings.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FlaggedCell {
    #[serde(flatten)]
    pub cell: CellRef,
    pub findings: FindingSet,
}

/// Sparse index of findings for a whole dataset.
///
/// Cells without findings are absent. Column entries hold the union of
/// their cells' findings, so a column is present iff one of its cells is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorIndex {
    cells: IndexMap<CellRef, FindingSet>,
    columns: IndexMap<usize, FindingSet>,
}

impl ErrorIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finding on a cell, updating its column union.
    pub fn record(&mut self, cell: CellRef, kind: FindingKind) {
        self.cells.entry(cell).or_default().insert(kind);
        self.columns.entry(cell.column).or_default().insert(kind);
    }

    /// Put cells in row-major order and columns in position order.
    pub(crate) fn finish(mut self) -> Self {
        self.cells.sort_keys();
        self.columns.sort_keys();
        self
    }

    /// Findings of one cell, if it has any.
    pub fn cell(&self, row: usize, column: usize) -> Option<FindingSet> {
        self.cells.get(&CellRef::new(row, column)).copied()
    }

    /// Union of findings in one column, if it has any.
    pub fn column(&self, column: usize) -> Option<FindingSet> {
        self.columns.get(&column).copied()
    }

    /// Flagged cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = FlaggedCell> + '_ {
        self.cells.iter().map(|(cell, findings)| FlaggedCell {
            cell: *cell,
            findings: *findings,
        })
    }

    /// Flagged columns in position order.
    pub fn columns(&self) -> impl Iterator<Item = (usize, FindingSet)> + '_ {
        self.columns.iter().map(|(c, f)| (*c, *f))
    }

    /// Number of flagged cells.
    pub fn flagged_cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of flagged columns.
    pub fn flagged_column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells carrying a kind, counted once per cell.
    pub fn count(&self, kind: FindingKind) -> usize {
        self.cells.values().filter(|f| f.contains(kind)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builds_column_union() {
        let mut index = ErrorIndex::new();
        index.record(CellRef::new(3, 1), FindingKind::Null);
        index.record(CellRef::new(0, 1), FindingKind::Outlier);
        index.record(CellRef::new(0, 1), FindingKind::Outlier);

        let column = index.column(1).unwrap();
        assert!(column.contains(FindingKind::Null));
        assert!(column.contains(FindingKind::Outlier));
        assert_eq!(column.len(), 2);
        assert_eq!(index.column(0), None);
        assert_eq!(index.cell(0, 1), Some(FindingSet::single(FindingKind::Outlier)));
    }

    #[test]
    fn test_finish_orders_row_major() {
        let mut index = ErrorIndex::new();
        index.record(CellRef::new(2, 0), FindingKind::Null);
        index.record(CellRef::new(0, 1), FindingKind::Null);
        index.record(CellRef::new(0, 0), FindingKind::Null);
        let index = index.finish();

        let order: Vec<_> = index.cells().map(|c| (c.cell.row, c.cell.column)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (2, 0)]);
    }

    #[test]
    fn test_count_per_kind() {
        let mut index = ErrorIndex::new();
        index.record(CellRef::new(0, 0), FindingKind::Null);
        index.record(CellRef::new(1, 0), FindingKind::Null);
        index.record(CellRef::new(1, 1), FindingKind::TypeMismatch);
        assert_eq!(index.count(FindingKind::Null), 2);
        assert_eq!(index.count(FindingKind::TypeMismatch), 1);
        assert_eq!(index.count(FindingKind::Outlier), 0);
        assert_eq!(index.flagged_cell_count(), 3);
    }
}
