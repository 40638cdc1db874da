//! Where keep-alive overrides come from.
//!
//! Overrides are read through [`EnvProvider`] so resolvers can be built from
//! a fixed table in tests instead of the process environment.

/// Comma-separated servers that must never be kept alive.
pub const DISABLE_KEEPALIVE_VAR: &str = "TOOLPORT_DISABLE_KEEPALIVE";

/// Comma-separated servers to keep alive when their config is silent.
pub const KEEPALIVE_VAR: &str = "TOOLPORT_KEEPALIVE";

/// Source of override lists, keyed by variable name.
pub trait EnvProvider {
    /// Raw value of `key`; unset and non-UTF-8 values both read as `None`.
    fn var(&self, key: &str) -> Option<String>;

    /// Both override lists as `(disabled, forced)`.
    fn keepalive_lists(&self) -> (Option<String>, Option<String>) {
        (self.var(DISABLE_KEEPALIVE_VAR), self.var(KEEPALIVE_VAR))
    }
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[cfg(test)]
impl EnvProvider for std::collections::HashMap<&str, &str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(ToString::to_string)
    }
}
