/// Error types for score persistence and reporting
use thiserror::Error;

/// Result type alias for score operations
pub type Result<T> = std::result::Result<T, ScoreError>;

/// Errors that can occur while storing, serving or submitting scores
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Name missing or blank
    #[error("Name is required")]
    MissingName,

    /// Score missing or not an integer
    #[error("Score is required")]
    MissingScore,

    /// Score outside 1..=u32::MAX
    #[error("Score must be a positive integer, got {0}")]
    InvalidScore(i64),

    /// Request body was not valid JSON
    #[error("Malformed request body: {0}")]
    BadRequest(String),

    /// Score service answered with a non-success status
    #[error("Score service returned {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Error message from the body, or the raw body
        message: String,
    },

    /// Score service did not answer in time
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Could not start the HTTP listener
    #[error("Server error: {0}")]
    Server(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScoreError {
    /// Whether the error was caused by the request rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ScoreError::MissingName
                | ScoreError::MissingScore
                | ScoreError::InvalidScore(_)
                | ScoreError::BadRequest(_)
        )
    }
}
