//! # Error Handling
//!
//! Error types for building, encoding and decoding CredHub envelopes.
//!
//! Errors raised by this crate fall into two groups:
//! - **local input errors** ([`CredHubError::InvalidArgument`]) raised while a
//!   name, value, parameter set or envelope is being constructed;
//! - **response errors** ([`CredHubError::Deserialization`]) raised when a
//!   document returned by the server cannot be mapped onto a typed value.
//!
//! Transport failures are produced by the transport collaborator and only pass
//! through this crate.

use thiserror::Error;

/// Result type for CredHub model operations.
pub type Result<T> = std::result::Result<T, CredHubError>;

/// Errors that can occur while working with CredHub envelopes.
#[derive(Error, Debug)]
pub enum CredHubError {
    /// Caller supplied an invalid or incomplete value.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A server response could not be mapped onto the expected type.
    #[error("Deserialization failed: {message}")]
    Deserialization { message: String },

    /// A request envelope could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The transport collaborator reported a failure.
    #[error("Transport error{}: {message}", status_suffix(.status))]
    Transport { status: Option<u16>, message: String },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status: {})", s)).unwrap_or_default()
}

impl CredHubError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument { message: message.into() }
    }

    /// Create a deserialization error.
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::Deserialization { message: message.into() }
    }

    /// Create a transport error without an HTTP status.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport { status: None, message: message.into() }
    }

    /// Create a transport error for a non-2xx HTTP status.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport { status: Some(status), message: message.into() }
    }

    /// Create a config error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Wrap a serde error raised while decoding a response body.
    pub(crate) fn decode(context: &str, source: serde_json::Error) -> Self {
        Self::Deserialization { message: format!("{}: {}", context, source) }
    }

    /// Whether this error was raised by local input validation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Whether this error was raised while decoding a response.
    pub fn is_deserialization(&self) -> bool {
        matches!(self, Self::Deserialization { .. })
    }
}
