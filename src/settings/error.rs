use crate::core::error_handling::ContextualError;
use std::path::PathBuf;
use thiserror::Error;

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read configuration store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write configuration store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration store {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("Configuration store unavailable: {0}")]
    Unavailable(String),
}

impl ContextualError for SettingsError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, SettingsError::Malformed { .. })
    }

    fn user_message(&self) -> Option<String> {
        match self {
            SettingsError::Malformed { .. } => Some(self.to_string()),
            _ => None,
        }
    }
}
