use std::path::Path;

use super::{load, print_json, Context};
use crate::error::CliError;
use crate::render;
use crate::OutputFormat;

pub(crate) fn cmd_tokens(file: &Path, ctx: &Context) -> Result<(), CliError> {
    let front = load(file, ctx)?;
    match ctx.output {
        OutputFormat::Json => {
            let lexical: Vec<_> = front
                .lexical_diagnostics
                .iter()
                .map(|d| d.to_json_value())
                .collect();
            print_json(&serde_json::json!({
                "tokens": front.tokens,
                "diagnostics": lexical,
            }))
        }
        OutputFormat::Text => {
            print!("{}", render::tokens_table(&front.tokens));
            if !front.lexical_diagnostics.is_empty() {
                println!();
                print!("{}", render::diagnostics_table(&front.lexical_diagnostics));
            }
            Ok(())
        }
    }
}
