//! Error types and handling for the MCP server.
//!
//! Tool-level failures (upstream HTTP errors, timeouts, malformed payloads)
//! never reach this type: they are rendered into `Error: ...` tool results.
//! What remains here are failures that stop the server from starting.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The Energinet API client could not be built.
    #[error("Energinet API error: {0}")]
    Api(#[from] crate::domains::tools::ApiError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
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
    use crate::domains::tools::ApiError;

    #[test]
    fn test_error_display() {
        let err: Error = ApiError::Unexpected("no TLS backend".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Energinet API error: Unexpected error: no TLS backend"
        );

        assert_eq!(
            Error::config("built without the `tcp` feature").to_string(),
            "Configuration error: built without the `tcp` feature"
        );
    }
}
