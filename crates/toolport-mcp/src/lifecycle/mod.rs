//! Connection lifecycle resolution.
//!
//! Decides whether a server connection should be kept alive between calls.
//! Inputs, in order of precedence:
//!
//! 1. `TOOLPORT_DISABLE_KEEPALIVE`: servers that must never be kept alive
//! 2. The lifecycle directive in the server's own configuration
//! 3. `TOOLPORT_KEEPALIVE`: servers that should always be kept alive
//! 4. Built-in [`KEEP_ALIVE_PROFILES`] for stateful servers
//!
//! Both environment variables hold comma-separated server identifiers. A
//! server matches by its configured name, its launch command (`npx-y`) or the
//! package it launches (`chrome-devtools`).

mod env;
mod profiles;

use std::collections::HashSet;
use toolport_core::{LifecycleDirective, LifecycleSpec, ServerCommandSignature};

pub use env::{DISABLE_KEEPALIVE_VAR, EnvProvider, KEEPALIVE_VAR, SystemEnv};
pub use profiles::{KEEP_ALIVE_PROFILES, LaunchProfile};

use profiles::{normalize_identifier, server_identifiers};

/// Keep-alive overrides read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeepAliveOverrides {
    disabled: HashSet<String>,
    forced: HashSet<String>,
}

impl KeepAliveOverrides {
    /// Read both override lists from an environment provider.
    pub fn from_env(env: &dyn EnvProvider) -> Self {
        let (disabled, forced) = env.keepalive_lists();
        Self {
            disabled: parse_list(disabled.as_deref()),
            forced: parse_list(forced.as_deref()),
        }
    }

    /// Never keep this server alive.
    #[must_use]
    pub fn with_disabled(mut self, id: &str) -> Self {
        self.disabled.extend(parse_list(Some(id)));
        self
    }

    /// Always keep this server alive unless its configuration says otherwise.
    #[must_use]
    pub fn with_forced(mut self, id: &str) -> Self {
        self.forced.extend(parse_list(Some(id)));
        self
    }

    fn is_disabled(&self, ids: &[String]) -> bool {
        ids.iter().any(|id| self.disabled.contains(id))
    }

    fn is_forced(&self, ids: &[String]) -> bool {
        ids.iter().any(|id| self.forced.contains(id))
    }
}

/// Parse a comma-separated identifier list; blank entries are ignored.
fn parse_list(raw: Option<&str>) -> HashSet<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(normalize_identifier)
        .filter(|id| !id.is_empty())
        .collect()
}

/// Resolves the effective lifecycle for server connections.
#[derive(Debug, Clone)]
pub struct LifecycleResolver {
    overrides: KeepAliveOverrides,
    profiles: &'static [LaunchProfile],
}

impl Default for LifecycleResolver {
    fn default() -> Self {
        Self::new(KeepAliveOverrides::default())
    }
}

impl LifecycleResolver {
    /// Create a resolver with the given overrides and the built-in profiles.
    pub const fn new(overrides: KeepAliveOverrides) -> Self {
        Self {
            overrides,
            profiles: KEEP_ALIVE_PROFILES,
        }
    }

    /// Create a resolver from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_provider(&SystemEnv)
    }

    /// Create a resolver from an environment provider.
    pub fn from_env_provider(env: &dyn EnvProvider) -> Self {
        Self::new(KeepAliveOverrides::from_env(env))
    }

    /// Replace the built-in keep-alive profiles.
    #[must_use]
    pub const fn with_profiles(mut self, profiles: &'static [LaunchProfile]) -> Self {
        self.profiles = profiles;
        self
    }

    /// Resolve the lifecycle for one server.
    ///
    /// Returns `None` when the server should use default (per-call)
    /// connection handling.
    pub fn resolve(
        &self,
        server_id: &str,
        directive: Option<&LifecycleDirective>,
        command: Option<&ServerCommandSignature>,
    ) -> Option<LifecycleSpec> {
        let ids = server_identifiers(server_id, command, self.profiles);

        if self.overrides.is_disabled(&ids) {
            tracing::debug!(server = %server_id, "Keep-alive disabled by environment");
            return None;
        }

        if let Some(directive) = directive {
            let spec = directive.to_spec();
            tracing::debug!(server = %server_id, mode = %spec.mode, "Using configured lifecycle");
            return Some(spec);
        }

        if self.overrides.is_forced(&ids) {
            tracing::debug!(server = %server_id, "Keep-alive forced by environment");
            return Some(LifecycleSpec::keep_alive());
        }

        let profile = self.profiles.iter().find(|profile| {
            ids.iter().any(|id| id == profile.id)
                || command.is_some_and(|command| profile.matches_command(command))
        });
        if let Some(profile) = profile {
            tracing::debug!(server = %server_id, profile = profile.id, "Keep-alive from built-in profile");
            return Some(LifecycleSpec::keep_alive());
        }

        None
    }
}

/// Resolve a server's lifecycle against the current process environment.
///
/// The environment is read on every call, so override changes take effect
/// without restarting.
pub fn resolve_lifecycle(
    server_id: &str,
    directive: Option<&LifecycleDirective>,
    command: Option<&ServerCommandSignature>,
) -> Option<LifecycleSpec> {
    LifecycleResolver::from_env().resolve(server_id, directive, command)
}
