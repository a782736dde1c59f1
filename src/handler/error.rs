//! Handler error types
//!
//! Covers the factory-level failures (unknown name, unavailable type,
//! construction) and the unexpected failures a handler may raise while
//! running. Expected export failures are not errors: handlers report them
//! as an unsuccessful [`ExecutionResult`](super::ExecutionResult).

use crate::core::error_handling::ContextualError;
use crate::data::DataError;
use crate::discovery::DiscoveryError;
use crate::settings::SettingsError;
use std::path::PathBuf;
use thiserror::Error;

pub type HandlerResult<T> = Result<T, HandlerError>;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Handler not found: {name}")]
    NotFound { name: String },

    #[error("Handler '{name}' is registered but its type {type_name} is unavailable")]
    TypeUnavailable { name: String, type_name: String },

    #[error("Failed to construct handler '{name}': {cause}")]
    Construction { name: String, cause: String },

    #[error("Invalid value for configuration key '{key}': {message}")]
    InvalidConfig { key: String, message: String },

    #[error("Handler '{name}' failed: {cause}")]
    Execution { name: String, cause: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

impl HandlerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HandlerError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_config(key: &str, message: impl Into<String>) -> Self {
        HandlerError::InvalidConfig {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

impl ContextualError for HandlerError {
    fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            HandlerError::NotFound { .. }
                | HandlerError::TypeUnavailable { .. }
                | HandlerError::InvalidConfig { .. }
        ) || matches!(self, HandlerError::Discovery(e) if e.is_user_actionable())
    }

    fn user_message(&self) -> Option<String> {
        if self.is_user_actionable() {
            Some(self.to_string())
        } else {
            None
        }
    }
}
