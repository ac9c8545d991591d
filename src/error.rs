//! Error types for planner operations.

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Error type for planner operations
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PlannerError {
    pub fn invalid(message: impl Into<String>) -> Self {
        PlannerError::InvalidInput(message.into())
    }

    /// Whether this error was caused by the caller's data rather than the environment.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PlannerError::InvalidInput(_))
    }
}
