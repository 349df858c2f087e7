//! Server error types.

use thiserror::Error;

/// Errors that abort server startup.
///
/// Per-request misses are not represented here: an unresolvable path is an
/// ordinary 404 response, never an error that reaches the accept loop.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration could not be loaded or deserialized.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The configured host:port pair does not parse as a socket address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// TLS material was requested but could not be read or parsed.
    #[error("TLS setup failed: {0}")]
    Tls(String),

    /// Listener creation or bind failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ServerError::Tls("cannot read key".to_string());
        assert_eq!(err.to_string(), "TLS setup failed: cannot read key");

        let err = ServerError::InvalidAddress("bad addr".to_string());
        assert_eq!(err.to_string(), "Invalid address: bad addr");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use");
        let err: ServerError = io.into();
        assert!(matches!(err, ServerError::Io(_)));
    }
}
