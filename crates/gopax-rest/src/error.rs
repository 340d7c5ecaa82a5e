//! Error types for REST API operations
//!
//! Four kinds of failure are kept apart:
//!
//! - **local** - bad credentials, unserializable body, bad parameters;
//!   raised before anything is sent
//! - **transport** - DNS, connect, timeout; the `reqwest` error unmodified
//! - **rejection** - the exchange answered with a non-2xx status
//! - **decode/contract** - a 2xx answer that does not match the endpoint's
//!   contract
//!
//! Nothing here is retried. A rejected signed request must be re-signed with
//! a fresh nonce before resending, and that is the caller's decision.

use gopax_auth::AuthError;

use crate::contract::ContractViolation;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Request body could not be serialized to JSON
    #[error("Cannot serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Exchange answered with a non-2xx status
    #[error("Request rejected with status {status}: {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body as received
        body: String,
    },

    /// 2xx response whose body does not have the endpoint's shape
    #[error("Cannot decode {endpoint} response: {message}")]
    Decode {
        /// Endpoint name
        endpoint: &'static str,
        /// Decoder message
        message: String,
    },

    /// 2xx response that decodes but breaks a contract rule
    #[error("Contract violation: {0}")]
    Contract(#[from] ContractViolation),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// No nonce left to sign with
    #[error("Nonce source exhausted")]
    NonceExhausted,
}

impl From<AuthError> for RestError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials(msg) => Self::InvalidCredentials(msg),
            AuthError::Serialize(e) => Self::Serialize(e),
            AuthError::EnvVarNotSet(var) => Self::EnvVarNotSet(var),
            AuthError::NonceExhausted => Self::NonceExhausted,
        }
    }
}

/// What a rejection status says about the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// 401/403: bad key, bad signature, or stale nonce
    Authentication,
    /// 400/422: the exchange refused the parameters
    Validation,
    /// 404: unknown resource (e.g. order id)
    NotFound,
    /// 429: too many requests
    RateLimited,
    /// 5xx
    Server,
    /// Anything else outside 2xx
    Other,
}

impl RejectionKind {
    /// Classify an HTTP status code
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Authentication,
            400 | 422 => Self::Validation,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }
}

impl RestError {
    /// HTTP status of a rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classification of a rejection
    pub fn rejection_kind(&self) -> Option<RejectionKind> {
        self.status().map(RejectionKind::from_status)
    }

    /// True for failures raised before any network call
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials(_)
                | Self::Serialize(_)
                | Self::AuthRequired
                | Self::InvalidParameter(_)
                | Self::EnvVarNotSet(_)
                | Self::NonceExhausted
        )
    }

    /// True for transport failures
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// True when the exchange answered with a non-2xx status
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// True for authentication rejections (bad signature, stale nonce)
    pub fn is_auth_failure(&self) -> bool {
        self.rejection_kind() == Some(RejectionKind::Authentication)
    }

    /// True when the exchange refused the parameters
    pub fn is_validation_failure(&self) -> bool {
        self.rejection_kind() == Some(RejectionKind::Validation)
    }

    /// True when the resource does not exist
    pub fn is_not_found(&self) -> bool {
        self.rejection_kind() == Some(RejectionKind::NotFound)
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
