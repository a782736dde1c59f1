//! Binary-level errors

use super::config::ConfigFileError;
use crate::core::error_handling::ContextualError;
use crate::data::DataError;
use crate::discovery::DiscoveryError;
use crate::handler::HandlerError;
use crate::settings::SettingsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigFileError),

    #[error(transparent)]
    Handler(#[from] HandlerError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl ContextualError for AppError {
    fn is_user_actionable(&self) -> bool {
        match self {
            AppError::Config(e) => e.is_user_actionable(),
            AppError::Handler(e) => e.is_user_actionable(),
            AppError::Discovery(e) => e.is_user_actionable(),
            AppError::Settings(e) => e.is_user_actionable(),
            AppError::Data(e) => e.is_user_actionable(),
            AppError::Argument(_) => true,
            AppError::Output(_) | AppError::Serialize(_) => false,
        }
    }

    fn user_message(&self) -> Option<String> {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Handler(e) => e.user_message(),
            AppError::Discovery(e) => e.user_message(),
            AppError::Settings(e) => e.user_message(),
            AppError::Data(e) => e.user_message(),
            AppError::Argument(_) => Some(self.to_string()),
            AppError::Output(_) | AppError::Serialize(_) => None,
        }
    }
}
