//! CLI command implementations.

pub mod check;
pub mod edit;
pub mod export;

use std::path::PathBuf;

use colored::{ColoredString, Colorize};
use tracing::debug;

use atlas::report::base_color;
use atlas::{
    Atlas, AtlasConfig, CellValue, Dataset, FindingKind, OutlierConfig, Rgb, ValidationContext,
};

/// Build an Atlas instance from the config file and command-line overrides.
pub(crate) fn build_atlas(
    sigma: Option<f64>,
    ddof: Option<usize>,
    config: Option<PathBuf>,
) -> Result<Atlas, Box<dyn std::error::Error>> {
    let mut outlier = match config {
        Some(path) => OutlierConfig::load(&path)?,
        None => OutlierConfig::default(),
    };
    if let Some(sigma) = sigma {
        outlier = outlier.with_sigma_threshold(sigma);
    }
    if let Some(ddof) = ddof {
        outlier = outlier.with_ddof(ddof);
    }
    outlier.validate()?;
    debug!(
        sigma = outlier.sigma_threshold,
        ddof = outlier.ddof,
        "outlier settings"
    );

    Ok(Atlas::with_config(AtlasConfig::default().with_outlier(outlier)))
}

/// A two-space block painted in the given color.
pub(crate) fn swatch(color: Rgb) -> ColoredString {
    "  ".on_truecolor(color.r, color.g, color.b)
}

/// Interpret a typed-in value. Missing-value sentinels become `Missing`.
pub(crate) fn parse_value(raw: &str) -> CellValue {
    if atlas::input::is_na_value(raw) {
        CellValue::Missing
    } else {
        CellValue::text(raw)
    }
}

/// Resolve a column given by name or by index.
pub(crate) fn resolve_column(dataset: &Dataset, column: &str) -> Result<usize, String> {
    if let Some(index) = dataset.column_index(column) {
        return Ok(index);
    }
    match column.parse::<usize>() {
        Ok(index) if index < dataset.column_count() => Ok(index),
        _ => Err(format!(
            "Unknown column: {}. Available: {}",
            column,
            dataset.headers().join(", ")
        )),
    }
}

/// Print the summary block and the chart counts.
pub(crate) fn print_summary(context: &ValidationContext) {
    let summary = context.summary();

    println!("{}", "Summary:".yellow().bold());
    for line in summary.to_text().lines() {
        println!("  {}", line);
    }
    println!();

    println!("{}", "Errors by type:".yellow().bold());
    let (null, type_mismatch, outlier) = summary.chart_counts();
    let max = null.max(type_mismatch).max(outlier).max(1);
    let bar_width = 30;
    for (kind, count) in [
        (FindingKind::Null, null),
        (FindingKind::TypeMismatch, type_mismatch),
        (FindingKind::Outlier, outlier),
    ] {
        let color = base_color(kind);
        let filled = count * bar_width / max;
        let bar = "█".repeat(filled).truecolor(color.r, color.g, color.b);
        println!("  {:<8} {} {}", kind.label(), bar, count);
    }
}

/// Print per-column flags with their light swatch.
pub(crate) fn print_columns(context: &ValidationContext) {
    let dataset = context.dataset();

    println!("{}", "Columns:".yellow().bold());
    for (index, column) in dataset.columns().iter().enumerate() {
        let flags = match context.column_findings(index) {
            Some(findings) => findings.to_string().red(),
            None => "ok".green(),
        };
        let tint = match context.colors().column_color(index) {
            Some(color) => swatch(color),
            None => "  ".normal(),
        };
        println!(
            "  {} {:<20} {:<8} {}",
            tint,
            column.name,
            column.column_type.label().dimmed(),
            flags
        );
    }
}

/// Print up to `limit` flagged cells with their dark swatch.
pub(crate) fn print_cells(context: &ValidationContext, limit: usize) {
    let dataset = context.dataset();
    let total = context.index().flagged_cell_count();
    if total == 0 || limit == 0 {
        return;
    }

    println!(
        "{} {}",
        "Flagged cells".yellow().bold(),
        format!("(showing {} of {})", limit.min(total), total).dimmed()
    );
    for flagged in context.index().cells().take(limit) {
        let (row, col) = (flagged.cell.row, flagged.cell.column);
        let colors = context.color_for(row, col);
        let name = dataset.column(col).map(|c| c.name.as_str()).unwrap_or("?");
        let value = dataset
            .get(row, col)
            .map(|v| v.to_string())
            .unwrap_or_default();

        let marker = match colors.background {
            Some(color) => swatch(color),
            None => "  ".normal(),
        };
        println!(
            "  {} row {:<6} {:<20} {:<16} {}",
            marker,
            row,
            name,
            format!("{:?}", value),
            flagged.findings.to_string().red()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use atlas::{Column, ColumnType};

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value(""), CellValue::Missing);
        assert_eq!(parse_value("NA"), CellValue::Missing);
        assert_eq!(parse_value("-5"), CellValue::text("-5"));
    }

    #[test]
    fn test_resolve_column() {
        let dataset = Dataset::new(vec![
            Column::new("a", ColumnType::Integer, vec![CellValue::Integer(1)]),
            Column::new("b", ColumnType::Text, vec![CellValue::text("x")]),
        ])
        .unwrap();

        assert_eq!(resolve_column(&dataset, "b"), Ok(1));
        assert_eq!(resolve_column(&dataset, "0"), Ok(0));
        assert!(resolve_column(&dataset, "2").is_err());
        assert!(resolve_column(&dataset, "c").is_err());
    }

    #[test]
    fn test_build_atlas_overrides_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"sigma_threshold": 2.5, "ddof": 1}"#).unwrap();

        let atlas = build_atlas(None, None, Some(file.path().to_path_buf())).unwrap();
        assert_eq!(atlas.config().outlier.sigma_threshold, 2.5);
        assert_eq!(atlas.config().outlier.ddof, 1);

        let atlas = build_atlas(Some(4.0), None, Some(file.path().to_path_buf())).unwrap();
        assert_eq!(atlas.config().outlier.sigma_threshold, 4.0);
        assert_eq!(atlas.config().outlier.ddof, 1);
    }

    #[test]
    fn test_build_atlas_rejects_negative_sigma() {
        assert!(build_atlas(Some(-1.0), None, None).is_err());
    }
}
