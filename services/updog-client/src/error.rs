//! Error types for the UpDog client

/// Errors that can occur in the UpDog client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Any non-success HTTP response or network failure. The remote service
    /// is never asked for a structured error body, so only a message remains.
    #[error("{0}")]
    Transport(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid state for operation: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
