//! CLI error types.

use deck_config::ConfigError;
use deck_engine::EngineError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// A document failed to convert; `path` names the offending input.
    #[error("{path}: {source}")]
    Convert { path: String, source: EngineError },

    #[error("{0}")]
    Validation(String),
}
