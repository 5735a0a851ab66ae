use thiserror::Error;

use crate::types::DebtId;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid input for {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    #[error("payment plan does not pay off debt {debt_id} (gave up after {months} months)")]
    NonConvergent {
        debt_id: DebtId,
        months: u32,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// http-equivalent status for the request layer
    pub fn status_code(&self) -> u16 {
        match self {
            EngineError::InvalidInput { .. } | EngineError::Serialization(_) => 400,
            EngineError::NonConvergent { .. } => 422,
            EngineError::InvalidConfiguration { .. } => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
