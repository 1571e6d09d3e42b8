//! Dataset-wide error counts and percentages.

use std::fmt;

use serde::Serialize;

use crate::validation::{ErrorIndex, FindingKind};

/// Count and share of cells carrying one finding kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KindSummary {
    pub kind: FindingKind,
    /// Cells carrying this kind.
    pub count: usize,
    /// `count / total_cells * 100`, full precision.
    pub percentage: f64,
}

/// Summary statistics derived from an error index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Per-kind figures in display order (Null, Type, Outlier).
    pub kinds: [KindSummary; 3],
    /// Sum of the per-kind counts. A cell with several kinds counts once per kind.
    pub total_errors: usize,
    /// Rows x columns.
    pub total_cells: usize,
    /// Distinct cells with at least one finding.
    pub flagged_cells: usize,
    /// Columns with at least one finding.
    pub flagged_columns: usize,
}

impl SummaryStats {
    /// Summarize an error index over a dataset of `total_cells` cells.
    pub fn from_index(index: &ErrorIndex, total_cells: usize) -> Self {
        let counts = FindingKind::ALL.map(|kind| index.count(kind));
        let mut stats = Self::from_counts(counts, total_cells);
        stats.flagged_cells = index.flagged_cell_count();
        stats.flagged_columns = index.flagged_column_count();
        stats
    }

    /// Build from raw per-kind counts in display order.
    pub fn from_counts(counts: [usize; 3], total_cells: usize) -> Self {
        let kinds = FindingKind::ALL.map(|kind| {
            let count = counts[kind.index()];
            KindSummary {
                kind,
                count,
                percentage: percentage(count, total_cells),
            }
        });

        Self {
            kinds,
            total_errors: counts.iter().sum(),
            total_cells,
            flagged_cells: 0,
            flagged_columns: 0,
        }
    }

    /// Figures for one kind.
    pub fn kind(&self, kind: FindingKind) -> &KindSummary {
        &self.kinds[kind.index()]
    }

    /// Cells carrying a kind.
    pub fn count(&self, kind: FindingKind) -> usize {
        self.kind(kind).count
    }

    /// Percentage of cells carrying a kind.
    pub fn percentage(&self, kind: FindingKind) -> f64 {
        self.kind(kind).percentage
    }

    /// `(null_count, type_count, outlier_count)` for bar charts.
    pub fn chart_counts(&self) -> (usize, usize, usize) {
        (
            self.count(FindingKind::Null),
            self.count(FindingKind::TypeMismatch),
            self.count(FindingKind::Outlier),
        )
    }

    /// Text block for the summary panel.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for summary in &self.kinds {
            writeln!(
                f,
                "{} Errors: {} ({:.2}%)",
                summary.kind.label(),
                summary.count,
                summary.percentage
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Total Errors: {}", self.total_errors)?;
        write!(f, "Total Cells: {}", self.total_cells)
    }
}

/// Share of `total` in percent; 0 when `total` is 0.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::CellRef;

    #[test]
    fn test_summary_text() {
        let stats = SummaryStats::from_counts([2, 1, 0], 12);
        let expected = "Null Errors: 2 (16.67%)\n\
                        Type Errors: 1 (8.33%)\n\
                        Outlier Errors: 0 (0.00%)\n\
                        \n\
                        Total Errors: 3\n\
                        Total Cells: 12";
        assert_eq!(stats.to_text(), expected);
    }

    #[test]
    fn test_percentage_keeps_precision() {
        let stats = SummaryStats::from_counts([1, 0, 0], 3);
        assert_eq!(stats.percentage(FindingKind::Null), (1.0 / 3.0) * 100.0);
    }

    #[test]
    fn test_zero_cells() {
        let stats = SummaryStats::from_counts([0, 0, 0], 0);
        for kind in FindingKind::ALL {
            assert_eq!(stats.percentage(kind), 0.0);
        }
        assert_eq!(percentage(5, 0), 0.0);
    }

    #[test]
    fn test_multi_kind_cells_count_per_kind() {
        let mut index = ErrorIndex::new();
        index.record(CellRef::new(0, 0), FindingKind::Null);
        index.record(CellRef::new(0, 0), FindingKind::Outlier);
        index.record(CellRef::new(1, 0), FindingKind::Outlier);

        let stats = SummaryStats::from_index(&index, 4);
        assert_eq!(stats.chart_counts(), (1, 0, 2));
        assert_eq!(stats.total_errors, 3);
        assert_eq!(stats.flagged_cells, 2);
        assert_eq!(stats.flagged_columns, 1);
    }
}
