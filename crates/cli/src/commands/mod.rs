//! One module per subcommand. Each returns `Err` only for failures of the
//! shell itself; diagnostics in the source are part of the normal output.

mod bracket;
mod check;
mod model;
mod report;
mod stats;
mod tokens;

pub(crate) use bracket::cmd_bracket;
pub(crate) use check::cmd_check;
pub(crate) use model::cmd_model;
pub(crate) use report::cmd_report;
pub(crate) use stats::cmd_stats;
pub(crate) use tokens::cmd_tokens;

use std::path::Path;

use serde::Serialize;
use torneo_core::{run_front_end, FrontEnd};

use crate::config::Config;
use crate::error::CliError;
use crate::OutputFormat;

/// Settings shared by every subcommand.
pub(crate) struct Context {
    pub output: OutputFormat,
    pub quiet: bool,
    pub config: Config,
}

pub(crate) fn read_source(file: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(file).map_err(|source| CliError::Read {
        path: file.to_path_buf(),
        source,
    })
}

/// Reads and scans `file`, then builds its model.
pub(crate) fn load(file: &Path, ctx: &Context) -> Result<FrontEnd, CliError> {
    let source = read_source(file)?;
    let front = run_front_end(&source, &ctx.config.parser);
    log::info!(
        "{}: {} token(s), {} diagnostic(s)",
        file.display(),
        front.tokens.len(),
        front.diagnostics().count()
    );
    Ok(front)
}

/// Notes on stderr that the output was built from a source with problems.
pub(crate) fn warn_if_diagnostics(front: &FrontEnd, ctx: &Context) {
    let count = front.diagnostics().count();
    if count == 0 || ctx.quiet {
        return;
    }
    let msg = format!(
        "source has {} problem(s); run `torneo check` for details",
        count
    );
    match ctx.output {
        OutputFormat::Text => eprintln!("warning: {}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "warning": msg, "problems": count }));
        }
    }
}

pub(crate) fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn diagnostics_json(front: &FrontEnd) -> Vec<serde_json::Value> {
    front.diagnostics().map(|d| d.to_json_value()).collect()
}
