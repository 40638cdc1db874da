//! Tool runtime error types.
//!
//! This module defines the errors a tool runtime reports back to callers.

use thiserror::Error;

/// Authorization failure reported by a transport.
///
/// Transports return this when a server rejects the client's credentials
/// (e.g. an OAuth flow that needs to be restarted). The connection classifier
/// recognises it without looking at the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct UnauthorizedError {
    message: String,
}

impl UnauthorizedError {
    /// Create an authorization failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The transport's message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by a [`ToolRuntime`](super::ToolRuntime).
///
/// These are opaque to the proxy layer and propagated to callers unchanged.
/// Messages are kept verbatim so they can be classified later.
#[derive(Debug, Error)]
pub enum ToolRuntimeError {
    /// The server rejected the client's credentials.
    #[error(transparent)]
    Unauthorized(#[from] UnauthorizedError),

    /// Transport-level failure (connection refused, timeout, HTTP error, ...).
    #[error("{0}")]
    Transport(String),

    /// Any other runtime failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ToolRuntimeError {
    /// Create a transport error from a message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// The authorization failure, if this is one.
    pub const fn as_unauthorized(&self) -> Option<&UnauthorizedError> {
        match self {
            Self::Unauthorized(err) => Some(err),
            Self::Transport(_) | Self::Other(_) => None,
        }
    }
}
