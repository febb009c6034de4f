//! Error types and handling for the MCP server.
//!
//! Tool calls never surface these: they are settled into JSON at the tool
//! boundary. This type covers start-up and transport failures.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The Routing Director client could not be built.
    #[error("Routing Director error: {0}")]
    Rd(#[from] crate::core::rd::RdError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The transport failed to start or stopped with an error.
    #[error("Transport error: {0}")]
    Transport(#[from] crate::core::transport::TransportError),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rd::RdError;

    #[test]
    fn test_display() {
        let err: Error = RdError::Client("RD_SERVER or RD_BASE_URL must be set".into()).into();
        assert!(err.to_string().starts_with("Routing Director error:"));
        assert_eq!(
            Error::config("bad port").to_string(),
            "Configuration error: bad port"
        );
    }
}
