use std::path::Path;

use super::{diagnostics_json, load, print_json, Context};
use crate::error::CliError;
use crate::render;
use crate::OutputFormat;

/// Returns whether the source is free of diagnostics.
pub(crate) fn cmd_check(file: &Path, ctx: &Context) -> Result<bool, CliError> {
    let front = load(file, ctx)?;
    let clean = !front.has_errors();

    if !ctx.quiet {
        match ctx.output {
            OutputFormat::Json => print_json(&serde_json::json!({
                "file": file.display().to_string(),
                "clean": clean,
                "diagnostics": diagnostics_json(&front),
            }))?,
            OutputFormat::Text => print!("{}", render::diagnostics_table(front.diagnostics())),
        }
    }
    Ok(clean)
}
