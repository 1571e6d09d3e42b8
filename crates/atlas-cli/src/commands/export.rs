//! Export command - write the loaded dataset back out verbatim.

use std::path::PathBuf;

use colored::Colorize;
use tracing::info;

use atlas::{Atlas, ExportFormat, Session};

use crate::cli::OutputFormat;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let format: ExportFormat = format.into();
    let output =
        output.unwrap_or_else(|| PathBuf::from(format!("updated_data.{}", format.extension())));

    let mut session = Session::new(Atlas::new());
    let context = session.open(&file)?;
    let rows = context.dataset().row_count();

    session.save(&output, format)?;
    info!(
        from = %file.display(),
        to = %output.display(),
        format = format.extension(),
        rows,
        "export complete"
    );

    println!(
        "{} {} rows to {}",
        "Exported".green().bold(),
        rows,
        output.display().to_string().white()
    );

    Ok(())
}
