//! Launch profiles and server identifiers.
//!
//! A server can be named in overrides by its configured name or by what its
//! launch command looks like. `npx -y chrome-devtools-mcp@latest` is known as
//! `npx-y` (command plus leading flags) and `chrome-devtools` (the package).

use std::collections::HashSet;
use toolport_core::ServerCommandSignature;

use crate::naming::kebab_case;

/// A server known to benefit from a persistent connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchProfile {
    /// Canonical server identifier.
    pub id: &'static str,
    /// Package the server is launched from (without version).
    pub package: &'static str,
}

impl LaunchProfile {
    /// Whether a stdio command launches this profile's package.
    pub fn matches_command(&self, command: &ServerCommandSignature) -> bool {
        command.is_stdio()
            && std::iter::once(&command.command)
                .chain(&command.args)
                .any(|token| package_name(token) == self.package)
    }
}

/// Servers that keep browser or device state between calls.
pub const KEEP_ALIVE_PROFILES: &[LaunchProfile] = &[
    LaunchProfile {
        id: "chrome-devtools",
        package: "chrome-devtools-mcp",
    },
    LaunchProfile {
        id: "mobile-mcp",
        package: "@mobilenext/mobile-mcp",
    },
    LaunchProfile {
        id: "playwright",
        package: "@playwright/mcp",
    },
];

/// All identifiers a server may be referred to by, normalised to kebab-case.
///
/// Only stdio launches contribute command and package identifiers.
pub(crate) fn server_identifiers(
    canonical_id: &str,
    command: Option<&ServerCommandSignature>,
    profiles: &[LaunchProfile],
) -> Vec<String> {
    let mut ids = vec![normalize_identifier(canonical_id)];

    if let Some(command) = command.filter(|command| command.is_stdio()) {
        ids.extend(command_identifier(command));
        ids.extend(package_identifier(command));
        ids.extend(
            profiles
                .iter()
                .filter(|profile| profile.matches_command(command))
                .map(|profile| profile.id.to_string()),
        );
    }

    let mut seen = HashSet::new();
    ids.retain(|id| !id.is_empty() && seen.insert(id.clone()));
    ids
}

/// Normalise a user-supplied identifier for comparison.
pub(crate) fn normalize_identifier(raw: &str) -> String {
    let mapped = kebab_case(raw.trim());
    let mut out = String::with_capacity(mapped.len());
    for c in mapped.chars() {
        if c == '-' && (out.is_empty() || out.ends_with('-')) {
            continue;
        }
        out.push(c);
    }
    out.trim_end_matches('-').to_string()
}

/// `npx -y chrome-devtools-mcp@latest` → `npx-y`.
fn command_identifier(command: &ServerCommandSignature) -> Option<String> {
    let program = command
        .command
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(&command.command);
    if program.is_empty() {
        return None;
    }

    let mut raw = program.to_string();
    for flag in command.args.iter().take_while(|arg| arg.starts_with('-')) {
        raw.push('-');
        raw.push_str(flag);
    }
    Some(normalize_identifier(&raw))
}

/// `chrome-devtools-mcp@latest` → `chrome-devtools`, `@scope/foo-mcp` → `foo`.
fn package_identifier(command: &ServerCommandSignature) -> Option<String> {
    let package = command.args.iter().find(|arg| !arg.starts_with('-'))?;
    let name = package_name(package);
    let name = name.rsplit('/').next().unwrap_or(name);
    let name = name.strip_suffix("-mcp").filter(|s| !s.is_empty()).unwrap_or(name);
    Some(normalize_identifier(name))
}

/// Strip a trailing `@version` from a package spec, keeping any `@scope/`.
fn package_name(spec: &str) -> &str {
    let search_from = usize::from(spec.starts_with('@'));
    spec.get(search_from..)
        .and_then(|rest| rest.find('@'))
        .and_then(|at| spec.get(..at + search_from))
        .unwrap_or(spec)
}
