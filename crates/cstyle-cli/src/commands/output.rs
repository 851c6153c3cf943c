//! Shared output formatting for lint results.

use anyhow::{Context, Result};
use cstyle_core::LintResult;
use std::path::Path;

use crate::OutputFormat;

/// Renders lint results in the specified format.
pub fn render(result: &LintResult, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Text => result.render_report(),
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Compact => render_compact(result),
    };
    Ok(rendered)
}

/// Prints the rendered results, or writes them to `output` when given.
pub fn emit(result: &LintResult, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let rendered = render(result, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn render_compact(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
