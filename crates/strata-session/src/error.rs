// Error types module
use thiserror::Error;

/// Errors produced by the engine session layer.
///
/// Two-tier taxonomy: `Setup` covers authentication and transport failures
/// while establishing (or re-establishing) a connection, after which the
/// session is unusable; `Query` covers malformed SQL and engine-side
/// execution failures, after which the session remains usable for a fresh
/// statement.
#[derive(Error, Debug, Clone)]
pub enum EngineError {
    /// Authentication or transport failure during open/switch.
    #[error("Connection error: {0}")]
    Setup(String),

    /// Malformed SQL or engine-side execution failure.
    #[error("Query error: {0}")]
    Query(String),

    /// A request-supplied identifier failed the allow-list check.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}

impl EngineError {
    /// Creates a Setup error with a message.
    pub fn setup(msg: impl Into<String>) -> Self {
        Self::Setup(msg.into())
    }

    /// Creates a Query error with a message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, EngineError>;
