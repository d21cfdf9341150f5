use std::path::PathBuf;

/// Failures of the shell itself. Problems in the source text are
/// diagnostics, not errors, and never reach this type.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("could not read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file exists but is not valid TOML for [`crate::config::Config`].
    #[error("invalid config '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
