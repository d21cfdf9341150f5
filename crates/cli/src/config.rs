//! `torneo.toml` loading.
//!
//! ```toml
//! [parser]
//! redeclaration = "keep-first"   # last-wins | keep-first | merge
//! strictness = "strict"          # lenient | strict
//!
//! [graph]
//! rank-dir = "TB"                # LR | TB
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use torneo_codegen::GraphOptions;
use torneo_core::ParseOptions;

use crate::error::CliError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub parser: ParseOptions,
    pub graph: GraphOptions,
}

/// Reads `path`, or returns defaults when no config was given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config, CliError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}

fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}
