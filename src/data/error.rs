use crate::core::error_handling::ContextualError;
use thiserror::Error;

pub type DataResult<T> = Result<T, DataError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Query failed: {statement}: {cause}")]
    Query { statement: String, cause: String },

    #[error("Unknown table '{table}'")]
    UnknownTable { table: String },

    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

impl ContextualError for DataError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, DataError::UnknownTable { .. })
    }

    fn user_message(&self) -> Option<String> {
        match self {
            DataError::UnknownTable { .. } => Some(self.to_string()),
            _ => None,
        }
    }
}
