//! Error types for arpoison

use thiserror::Error;

/// Result type alias for arpoison operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for arpoison
#[derive(Error, Debug)]
pub enum Error {
    /// Network I/O error
    #[error("Network I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Interface error
    #[error("Interface error: {0}")]
    Interface(String),

    /// Packet capture error
    #[error("Packet capture error: {0}")]
    Capture(String),

    /// Hardware-address resolution failed
    #[error("Address resolution error: {0}")]
    Resolution(String),

    /// Forwarding-control error
    #[error("Firewall error: {0}")]
    Firewall(String),

    /// Packet parsing error
    #[error("Packet parsing error: {0}")]
    PacketParsing(String),

    /// Operation requires a running engine
    #[error("Spoofer is not running")]
    NotRunning,
}

impl Error {
    /// Create a capture error with a custom message
    pub fn capture<S: Into<String>>(msg: S) -> Self {
        Error::Capture(msg.into())
    }

    /// Create a resolution error with a custom message
    pub fn resolution<S: Into<String>>(msg: S) -> Self {
        Error::Resolution(msg.into())
    }

    /// Create a parsing error with a custom message
    pub fn parsing<S: Into<String>>(msg: S) -> Self {
        Error::PacketParsing(msg.into())
    }
}
