//! Error types for Routing Director calls.

use thiserror::Error;

/// Result type for Routing Director operations.
pub type RdResult<T> = Result<T, RdError>;

/// Authentication failures: no usable credential, or the login was refused.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The login endpoint answered with a status outside 200/201.
    #[error("Authentication failed: {status} - {body}")]
    Rejected { status: u16, body: String },

    /// The login succeeded but none of the known token fields was present.
    #[error("No token found in authentication response. Response: {response}")]
    MissingToken { response: String },

    /// The login response body was not JSON.
    #[error("Authentication response is not valid JSON: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// Neither a static token nor an email/password pair is configured.
    #[error("No usable credential: set RD_API_TOKEN or both RD_EMAIL and RD_PASSWORD")]
    NoCredentials,

    /// The login request never got an answer.
    #[error("Login request failed: {0}")]
    Request(#[source] reqwest::Error),
}

/// Errors raised while executing a Routing Director request.
#[derive(Debug, Error)]
pub enum RdError {
    /// Resolving auth headers failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// RD answered with a status the endpoint does not accept.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Connection, TLS or timeout failure.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded as JSON.
    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request was rejected before reaching the network.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl RdError {
    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Status code carried by the error, if RD answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Auth(AuthError::Rejected { status, .. }) => Some(*status),
            _ => None,
        }
    }
}
