//! Check command - validate a data file and report findings.

use std::path::PathBuf;

use colored::Colorize;
use serde_json::json;

use super::{build_atlas, print_cells, print_columns, print_summary};

pub fn run(
    file: PathBuf,
    json_output: bool,
    cells: usize,
    sigma: Option<f64>,
    ddof: Option<usize>,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let atlas = build_atlas(sigma, ddof, config)?;

    let context = atlas.analyze(&file)?;
    let dataset = context.dataset();

    if json_output {
        let columns: Vec<_> = dataset
            .columns()
            .iter()
            .enumerate()
            .map(|(index, column)| {
                json!({
                    "name": column.name,
                    "type": column.column_type,
                    "findings": context.column_findings(index).unwrap_or_default(),
                    "color": context.colors().column_color(index).map(|c| c.to_hex()),
                })
            })
            .collect();

        let flagged: Vec<_> = context
            .index()
            .cells()
            .take(cells)
            .map(|flagged| {
                let colors = context.color_for(flagged.cell.row, flagged.cell.column);
                json!({
                    "row": flagged.cell.row,
                    "column": flagged.cell.column,
                    "value": dataset.get(flagged.cell.row, flagged.cell.column),
                    "findings": flagged.findings,
                    "background": colors.background.map(|c| c.to_hex()),
                    "foreground": colors.foreground.to_hex(),
                })
            })
            .collect();

        let report = json!({
            "source": context.source(),
            "summary": context.summary(),
            "columns": columns,
            "cells": flagged,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows x {} columns)",
        "Checked".green().bold(),
        file.display().to_string().white(),
        dataset.row_count(),
        dataset.column_count()
    );
    if let Some(source) = context.source() {
        println!("  {} {}", "Hash:".dimmed(), source.hash.dimmed());
    }
    println!();

    print_summary(&context);
    println!();
    print_columns(&context);

    if !context.index().is_empty() {
        println!();
        print_cells(&context, cells);
    }

    Ok(())
}
