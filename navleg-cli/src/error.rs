//! CLI error type.

use navleg::config::ConfigError;
use navleg::{LegError, NavDataError};
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration problem (bad key, missing setting, unreadable file).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Navigation data could not be loaded.
    #[error("Navigation data error: {0}")]
    NavData(#[from] NavDataError),

    /// A route segment could not be turned into a leg.
    #[error("Leg error: {0}")]
    Leg(#[from] LegError),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}
