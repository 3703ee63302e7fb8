use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Failed to read image: {0}")]
    ImageReadError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Failed to write flag log: {0}")]
    LogWriteError(String),

    #[error("Internal server error")]
    InternalServerError,
}
