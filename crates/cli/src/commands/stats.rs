use std::path::Path;

use super::{load, print_json, warn_if_diagnostics, Context};
use crate::error::CliError;
use crate::render;
use crate::OutputFormat;

pub(crate) fn cmd_stats(file: &Path, ctx: &Context) -> Result<(), CliError> {
    let front = load(file, ctx)?;
    warn_if_diagnostics(&front, ctx);

    let report = torneo_analyze::analyze(&front.model);
    let tallies = torneo_analyze::tally_scorers(&report.scorers);
    match ctx.output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "standings": report.standings,
            "scorers": report.scorers,
            "tallies": tallies,
            "findings": report.findings,
        })),
        OutputFormat::Text => {
            print!("{}", render::stats_report(&report, &tallies));
            Ok(())
        }
    }
}
