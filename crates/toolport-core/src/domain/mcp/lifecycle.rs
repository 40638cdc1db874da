//! Connection lifecycle types.

use serde::{Deserialize, Serialize};

/// How long a server connection is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleMode {
    /// Hold the connection open across calls.
    KeepAlive,
    /// Connect and tear down per call.
    Ephemeral,
}

impl std::fmt::Display for LifecycleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeepAlive => write!(f, "keep-alive"),
            Self::Ephemeral => write!(f, "ephemeral"),
        }
    }
}

/// Resolved retention policy for one server.
///
/// The idle timeout is unsigned, so a keep-alive spec can never carry a
/// negative timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleSpec {
    /// Retention mode.
    pub mode: LifecycleMode,

    /// Idle period after which a kept-alive connection may be closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_timeout_ms: Option<u64>,
}

impl LifecycleSpec {
    /// Keep-alive with no idle timeout.
    pub const fn keep_alive() -> Self {
        Self {
            mode: LifecycleMode::KeepAlive,
            idle_timeout_ms: None,
        }
    }

    /// Ephemeral, one connection per call.
    pub const fn ephemeral() -> Self {
        Self {
            mode: LifecycleMode::Ephemeral,
            idle_timeout_ms: None,
        }
    }

    /// Set the idle timeout.
    #[must_use]
    pub const fn with_idle_timeout_ms(mut self, ms: u64) -> Self {
        self.idle_timeout_ms = Some(ms);
        self
    }

    /// Returns `true` for keep-alive specs.
    pub const fn is_keep_alive(&self) -> bool {
        matches!(self.mode, LifecycleMode::KeepAlive)
    }
}

impl From<LifecycleMode> for LifecycleSpec {
    fn from(mode: LifecycleMode) -> Self {
        Self {
            mode,
            idle_timeout_ms: None,
        }
    }
}

/// Lifecycle directive supplied with a server's configuration.
///
/// Accepts either a bare mode string (`"ephemeral"`) or a full spec object
/// (`{"mode": "keep-alive", "idleTimeoutMs": 5000}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LifecycleDirective {
    /// Mode shorthand.
    Shorthand(LifecycleMode),
    /// Full spec.
    Spec(LifecycleSpec),
}

impl LifecycleDirective {
    /// The spec this directive stands for.
    pub const fn to_spec(self) -> LifecycleSpec {
        match self {
            Self::Shorthand(mode) => LifecycleSpec {
                mode,
                idle_timeout_ms: None,
            },
            Self::Spec(spec) => spec,
        }
    }
}

impl From<LifecycleSpec> for LifecycleDirective {
    fn from(spec: LifecycleSpec) -> Self {
        Self::Spec(spec)
    }
}

impl From<LifecycleMode> for LifecycleDirective {
    fn from(mode: LifecycleMode) -> Self {
        Self::Shorthand(mode)
    }
}

/// Transport a server is reached through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Local process spoken to over stdio.
    #[default]
    Stdio,
    /// Remote server reached over HTTP.
    Http,
}

/// How a server process is launched.
///
/// Only used to recognise servers; process control lives elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerCommandSignature {
    /// Transport kind.
    pub kind: TransportKind,
    /// Executable name or path (e.g. `npx`).
    pub command: String,
    /// Arguments, in order.
    #[serde(default)]
    pub args: Vec<String>,
    /// Working directory.
    #[serde(default)]
    pub cwd: String,
}

impl ServerCommandSignature {
    /// Create a stdio command signature.
    pub fn stdio<I, S>(command: impl Into<String>, args: I, cwd: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: TransportKind::Stdio,
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.into(),
        }
    }

    /// Returns `true` for stdio-launched servers.
    pub const fn is_stdio(&self) -> bool {
        matches!(self.kind, TransportKind::Stdio)
    }
}
