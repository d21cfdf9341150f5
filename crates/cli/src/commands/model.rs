use std::path::Path;

use super::{load, print_json, warn_if_diagnostics, Context};
use crate::error::CliError;
use crate::render;
use crate::OutputFormat;

pub(crate) fn cmd_model(file: &Path, ctx: &Context) -> Result<(), CliError> {
    let front = load(file, ctx)?;
    warn_if_diagnostics(&front, ctx);
    match ctx.output {
        OutputFormat::Json => print_json(&front.model),
        OutputFormat::Text => {
            print!("{}", render::model_summary(&front.model));
            Ok(())
        }
    }
}
