//! Configuration-time errors
//!
//! The simulation itself has no recoverable error surface. Everything that
//! can go wrong is caught here, before the tick loop starts.

use thiserror::Error;

/// Errors raised while building or loading a game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid mode parameter `{field}`: {reason}")]
    InvalidParam { field: &'static str, reason: String },

    #[error("unknown game mode `{0}` (expected `normal` or `hard`)")]
    UnknownMode(String),

    #[error("invalid setting `{field}`: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn param(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParam {
            field,
            reason: reason.into(),
        }
    }
}
