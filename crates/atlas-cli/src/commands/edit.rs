//! Edit command - change one cell, revalidate, and optionally save.

use std::path::PathBuf;

use colored::Colorize;
use tracing::info;

use atlas::{ExportFormat, Session};

use super::{build_atlas, parse_value, print_summary, resolve_column, swatch};

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    row: usize,
    column: String,
    value: String,
    output: Option<PathBuf>,
    sigma: Option<f64>,
    ddof: Option<usize>,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(build_atlas(sigma, ddof, config)?);
    let before = session.open(&file)?;

    let col = resolve_column(before.dataset(), &column)?;
    let errors_before = before.summary().total_errors;
    let previous = before
        .dataset()
        .get(row, col)
        .map(|v| v.to_string())
        .unwrap_or_default();

    let Some(context) = session.edit_cell(row, col, parse_value(&value))? else {
        return Err("No dataset loaded".into());
    };

    let name = &context.dataset().columns()[col].name;
    println!(
        "{} row {}, {}: {:?} -> {:?}",
        "Edited".green().bold(),
        row,
        name.white(),
        previous,
        value
    );

    let colors = context.color_for(row, col);
    match context.cell_findings(row, col) {
        Some(findings) => {
            match colors.background {
                Some(color) => println!("  {} {}", swatch(color), findings.to_string().red()),
                None => println!("  {}", findings.to_string().red()),
            }
        }
        None => println!("  {}", "no findings".green()),
    }

    info!(
        row,
        column = %name,
        errors_before,
        errors_after = context.summary().total_errors,
        "cell revalidated"
    );
    println!();
    print_summary(context);

    if let Some(output) = output {
        let format = ExportFormat::from_path(&output);
        session.save(&output, format)?;
        println!();
        println!(
            "{} {}",
            "Saved to".green().bold(),
            output.display().to_string().white()
        );
    }

    Ok(())
}
