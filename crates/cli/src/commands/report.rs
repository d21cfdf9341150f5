use std::path::Path;

use torneo_codegen::generate_bracket_graph_with;

use super::{diagnostics_json, load, print_json, Context};
use crate::error::CliError;
use crate::render;
use crate::OutputFormat;

/// Diagnostics, model, stats and bracket of one file in a single document.
pub(crate) fn cmd_report(file: &Path, ctx: &Context) -> Result<(), CliError> {
    let front = load(file, ctx)?;
    let analysis = torneo_analyze::analyze(&front.model);
    let tallies = torneo_analyze::tally_scorers(&analysis.scorers);
    let dot = generate_bracket_graph_with(&front.model, &ctx.config.graph);

    match ctx.output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "file": file.display().to_string(),
            "diagnostics": diagnostics_json(&front),
            "model": front.model,
            "analysis": analysis,
            "tallies": tallies,
            "bracket": dot,
        })),
        OutputFormat::Text => {
            println!("== Problems ==");
            print!("{}", render::diagnostics_table(front.diagnostics()));
            println!();
            println!("== Tournament ==");
            print!("{}", render::model_summary(&front.model));
            println!();
            println!("== Stats ==");
            print!("{}", render::stats_report(&analysis, &tallies));
            println!();
            println!("== Bracket (DOT) ==");
            print!("{}", dot);
            Ok(())
        }
    }
}
