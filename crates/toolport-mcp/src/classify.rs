//! Connection error classification.
//!
//! Maps transport and authorization failures onto [`ConnectionIssueKind`] so
//! callers can decide whether to re-authenticate, retry later, or give up.

use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::sync::LazyLock;
use toolport_core::{ConnectionIssue, ToolRuntimeError, UnauthorizedError};

use crate::proxy::ProxyError;

/// HTTP statuses that mean the server wants (different) credentials.
const AUTH_STATUSES: [u16; 3] = [401, 403, 405];

const AUTH_MARKERS: [&str; 4] = ["401", "unauthorized", "invalid_token", "forbidden"];

const OFFLINE_PATTERNS: [&str; 11] = [
    "fetch failed",
    "econnrefused",
    "connection refused",
    "connection closed",
    "connection reset",
    "socket hang up",
    "connect timeout",
    "network is unreachable",
    "timed out",
    "timeout",
    "timeout after",
];

static STATUS_CODE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)status code\s*\((\d{3})\)").ok());

/// A failure value to classify.
///
/// Built from runtime errors, arbitrary `std::error::Error`s, plain messages
/// or structured JSON through the `From` impls below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure<'a> {
    /// An authorization failure recognised by type.
    Unauthorized(Cow<'a, str>),
    /// Any other failure, by message.
    Message(Cow<'a, str>),
}

impl Failure<'_> {
    fn from_error_chain(err: &(dyn StdError + 'static)) -> Self {
        if chain_is_unauthorized(err) {
            Self::Unauthorized(Cow::Owned(err.to_string()))
        } else {
            Self::Message(Cow::Owned(err.to_string()))
        }
    }
}

fn chain_is_unauthorized(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<UnauthorizedError>()
            || e
                .downcast_ref::<ToolRuntimeError>()
                .is_some_and(|r| r.as_unauthorized().is_some())
        {
            return true;
        }
        current = e.source();
    }
    false
}

impl<'a> From<&'a ToolRuntimeError> for Failure<'a> {
    fn from(err: &'a ToolRuntimeError) -> Self {
        match err {
            ToolRuntimeError::Unauthorized(e) => Self::Unauthorized(Cow::Borrowed(e.message())),
            ToolRuntimeError::Transport(message) => Self::Message(Cow::Borrowed(message)),
            ToolRuntimeError::Other(e) => Self::from(e),
        }
    }
}

impl<'a> From<&'a ProxyError> for Failure<'a> {
    fn from(err: &'a ProxyError) -> Self {
        match err {
            ProxyError::Runtime(e) => Self::from(e),
            other => Self::Message(Cow::Owned(other.to_string())),
        }
    }
}

impl From<&anyhow::Error> for Failure<'_> {
    fn from(err: &anyhow::Error) -> Self {
        let unauthorized = err.chain().any(chain_is_unauthorized);
        if unauthorized {
            Self::Unauthorized(Cow::Owned(err.to_string()))
        } else {
            Self::Message(Cow::Owned(err.to_string()))
        }
    }
}

impl From<&(dyn StdError + 'static)> for Failure<'_> {
    fn from(err: &(dyn StdError + 'static)) -> Self {
        Self::from_error_chain(err)
    }
}

impl From<&(dyn StdError + Send + Sync + 'static)> for Failure<'_> {
    fn from(err: &(dyn StdError + Send + Sync + 'static)) -> Self {
        Self::from_error_chain(err)
    }
}

impl<'a> From<&'a str> for Failure<'a> {
    fn from(message: &'a str) -> Self {
        Self::Message(Cow::Borrowed(message))
    }
}

impl<'a> From<&'a String> for Failure<'a> {
    fn from(message: &'a String) -> Self {
        Self::Message(Cow::Borrowed(message))
    }
}

impl<'a> From<&'a Value> for Failure<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Message(Cow::Borrowed("")),
            Value::String(message) => Self::Message(Cow::Borrowed(message)),
            other => Self::Message(Cow::Owned(
                serde_json::to_string(other).unwrap_or_default(),
            )),
        }
    }
}

impl<'a, T> From<Option<T>> for Failure<'a>
where
    T: Into<Failure<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Message(Cow::Borrowed("")), Into::into)
    }
}

/// Classify a connection failure.
///
/// Authorization failures recognised by type are reported as `auth` without
/// looking at the message. Otherwise the message is checked for an embedded
/// `status code (NNN)`, auth markers, then network failure patterns.
pub fn classify<'a>(failure: impl Into<Failure<'a>>) -> ConnectionIssue {
    let message = match failure.into() {
        Failure::Unauthorized(message) => return ConnectionIssue::auth(message, None),
        Failure::Message(message) => message.into_owned(),
    };

    let status_code = extract_status_code(&message);
    let normalized = message.to_lowercase();

    if status_code.is_some_and(|code| AUTH_STATUSES.contains(&code))
        || AUTH_MARKERS.iter().any(|marker| normalized.contains(marker))
    {
        return ConnectionIssue::auth(message, status_code);
    }

    if OFFLINE_PATTERNS
        .iter()
        .any(|pattern| normalized.contains(pattern))
    {
        return ConnectionIssue::offline(message);
    }

    ConnectionIssue::other(message)
}

/// Returns `true` if the issue calls for re-authentication.
pub const fn is_auth_issue(issue: &ConnectionIssue) -> bool {
    issue.is_auth()
}

fn extract_status_code(message: &str) -> Option<u16> {
    STATUS_CODE_PATTERN
        .as_ref()?
        .captures(message)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}
