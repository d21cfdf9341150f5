use std::path::Path;

use torneo_codegen::{generate_bracket_graph_with, RankDir};

use super::{load, print_json, warn_if_diagnostics, Context};
use crate::error::CliError;
use crate::OutputFormat;

/// Writes the DOT graph to `out`, or to stdout when no path is given.
pub(crate) fn cmd_bracket(
    file: &Path,
    out: Option<&Path>,
    top_down: bool,
    ctx: &Context,
) -> Result<(), CliError> {
    let front = load(file, ctx)?;
    warn_if_diagnostics(&front, ctx);

    let mut options = ctx.config.graph;
    if top_down {
        options.rank_dir = RankDir::TopBottom;
    }
    let dot = generate_bracket_graph_with(&front.model, &options);

    match out {
        Some(path) => {
            std::fs::write(path, &dot).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            if !ctx.quiet {
                match ctx.output {
                    OutputFormat::Json => print_json(&serde_json::json!({
                        "written": path.display().to_string(),
                        "bytes": dot.len(),
                    }))?,
                    OutputFormat::Text => println!("wrote {}", path.display()),
                }
            }
            Ok(())
        }
        None => match ctx.output {
            OutputFormat::Json => print_json(&serde_json::json!({ "dot": dot })),
            OutputFormat::Text => {
                print!("{}", dot);
                Ok(())
            }
        },
    }
}
