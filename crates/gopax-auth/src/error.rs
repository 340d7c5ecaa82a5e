//! Error types for authentication operations

/// Errors that can occur while preparing a signed request
///
/// All of these are local: they are raised before anything is sent.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid API credentials (e.g. secret is not base64)
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Request body could not be serialized to JSON
    #[error("Cannot serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Nonce source has no larger value left to hand out
    #[error("Nonce source exhausted")]
    NonceExhausted,
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
