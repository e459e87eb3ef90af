//! Error types for rosapi
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using RosError
pub type Result<T> = std::result::Result<T, RosError>;

/// Unified error type for rosapi operations
#[derive(Debug, Error)]
pub enum RosError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// Length prefix could not be decoded or encoded
    #[error("Framing error: {0}")]
    Framing(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("TLS error: {0}")]
    Tls(String),

    /// A word was written or read with no live socket
    #[error("Not connected")]
    NotConnected,

    /// The router did not accept the login handshake
    #[error("Login rejected")]
    LoginRejected,

    /// Every connect attempt failed (socket open or login)
    #[error("Failed to connect to {host} after {attempts} attempt(s)")]
    ConnectFailed { host: String, attempts: u32 },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
