use thiserror::Error;

use crate::quota::Violation;

#[derive(Debug, Error)]
pub enum QuotaError {
    #[error("At least one ingredient is required")]
    EmptySelection,

    #[error("Duplicate ingredient IDs are not allowed: {}", ids.join(", "))]
    DuplicateIngredientIds { ids: Vec<String> },

    #[error("Invalid ingredient values per category ({0})")]
    QuotaExceeded(Violation),

    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl QuotaError {
    /// HTTP status a request handler should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            QuotaError::EmptySelection
            | QuotaError::DuplicateIngredientIds { .. }
            | QuotaError::QuotaExceeded(_)
            | QuotaError::InvalidInput(_) => 400,
            QuotaError::IngredientNotFound(_) => 404,
            _ => 500,
        }
    }

    /// Rejections of the submitted set itself, as opposed to system failures.
    pub fn is_rejection(&self) -> bool {
        self.status_code() == 400
    }
}

pub type Result<T> = std::result::Result<T, QuotaError>;
