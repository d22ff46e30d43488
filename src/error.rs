//! Error types for lookups, fetches and commands.

use thiserror::Error;

/// Errors reported by the resolver, the recipe client and the command layer.
///
/// None of these are fatal: the command boundary turns each one into a single
/// diagnostic line and the session carries on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("request to {endpoint} failed: {message}")]
    Network { endpoint: String, message: String },

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("recipe with index or id '{token}' not found: {reason}")]
    NotFound { token: String, reason: String },

    #[error("\"{name}\" is already bound, delete it before importing another recipe (del {name})")]
    StateConflict { name: String },

    #[error("{0} is not supported by this front end")]
    UnsupportedMode(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    Input(String),

    #[error("workspace file {path}: {message}")]
    Workspace { path: String, message: String },
}

impl LookupError {
    pub fn workspace(path: &std::path::Path, err: std::io::Error) -> Self {
        LookupError::Workspace {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub fn not_found(token: impl Into<String>, reason: impl Into<String>) -> Self {
        LookupError::NotFound {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Short label used as the diagnostic prefix.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::Network { .. } => "network",
            LookupError::Parse(_) => "parse",
            LookupError::NotFound { .. } => "not found",
            LookupError::StateConflict { .. } => "conflict",
            LookupError::UnsupportedMode(_) => "unsupported",
            LookupError::Config(_) => "config",
            LookupError::Input(_) => "input",
            LookupError::Workspace { .. } => "workspace",
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
