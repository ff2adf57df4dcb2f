//! Error types for the robot core.
//!
//! [`HermesError`] is the top-level error shared by every Hermes crate.

use thiserror::Error;

/// Top-level error for Hermes (identity validation, patterns, scripts, handlers, config, IO).
#[derive(Error, Debug)]
pub enum HermesError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Script error at line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("Handler error: {0}")]
    Handler(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HermesError {
    /// Shorthand for a script error at the given 1-based line.
    pub fn script(line: usize, message: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: message.into(),
        }
    }
}

/// Result type for core operations; uses [`HermesError`].
pub type Result<T> = std::result::Result<T, HermesError>;
