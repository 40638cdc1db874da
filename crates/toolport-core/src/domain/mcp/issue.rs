//! Classified connection failures.

use serde::{Deserialize, Serialize};

/// Category of a connection failure, used for retry and UX decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionIssueKind {
    /// The server rejected our credentials.
    Auth,
    /// The server could not be reached.
    Offline,
    /// Anything else.
    Other,
}

impl std::fmt::Display for ConnectionIssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth => write!(f, "auth"),
            Self::Offline => write!(f, "offline"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A failure normalised into a small taxonomy.
///
/// Derived fresh for every failure; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionIssue {
    /// Failure category.
    pub kind: ConnectionIssueKind,

    /// Message the category was derived from.
    pub raw_message: String,

    /// HTTP status parsed from the message, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl ConnectionIssue {
    /// Create an auth issue.
    pub fn auth(raw_message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            kind: ConnectionIssueKind::Auth,
            raw_message: raw_message.into(),
            status_code,
        }
    }

    /// Create an offline issue.
    pub fn offline(raw_message: impl Into<String>) -> Self {
        Self {
            kind: ConnectionIssueKind::Offline,
            raw_message: raw_message.into(),
            status_code: None,
        }
    }

    /// Create an uncategorised issue.
    pub fn other(raw_message: impl Into<String>) -> Self {
        Self {
            kind: ConnectionIssueKind::Other,
            raw_message: raw_message.into(),
            status_code: None,
        }
    }

    /// Returns `true` for auth issues.
    pub const fn is_auth(&self) -> bool {
        matches!(self.kind, ConnectionIssueKind::Auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_serialization() {
        let issue = ConnectionIssue::auth("status code (401)", Some(401));
        let json = serde_json::to_string(&issue).unwrap();
        assert!(json.contains("\"kind\":\"auth\""));
        assert!(json.contains("\"rawMessage\":\"status code (401)\""));
        assert!(json.contains("\"statusCode\":401"));

        let offline = serde_json::to_string(&ConnectionIssue::offline("ECONNREFUSED")).unwrap();
        assert!(!offline.contains("statusCode"));
    }

    #[test]
    fn test_is_auth() {
        assert!(ConnectionIssue::auth("forbidden", None).is_auth());
        assert!(!ConnectionIssue::other("disk full").is_auth());
    }
}
