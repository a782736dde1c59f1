use crate::core::error_handling::ContextualError;
use thiserror::Error;

pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiscoveryError {
    /// A source location could not be enumerated
    #[error("Handler source '{location}' is unreadable: {cause}")]
    SourceUnavailable { location: String, cause: String },

    /// Two discovered handlers share a name
    #[error("Handler name '{name}' is declared by both {first} and {second}")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },

    #[error("Discovery cache unavailable: {0}")]
    Cache(String),
}

impl ContextualError for DiscoveryError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, DiscoveryError::DuplicateName { .. })
    }

    fn user_message(&self) -> Option<String> {
        match self {
            DiscoveryError::DuplicateName { .. } => Some(self.to_string()),
            _ => None,
        }
    }
}
