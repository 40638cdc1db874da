//! Member-name to tool-name mapping.
//!
//! Callers address tools with identifier-style names (`resolveLibraryId`,
//! `get_weather`); servers expose kebab-case names (`resolve-library-id`).

use std::sync::Arc;
use thiserror::Error;

/// Errors raised when a member name cannot be turned into a tool name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolNameError {
    #[error("Tool name must not be empty")]
    Empty,

    /// Raised by custom mappers that refuse a name.
    #[error("Tool name '{0}' was rejected by the name mapper")]
    Rejected(String),
}

/// Replaceable mapping from member names to tool names.
pub type ToolNameMapper = Arc<dyn Fn(&str) -> Result<String, ToolNameError> + Send + Sync>;

/// Default mapper: converts any non-empty member name to kebab-case.
///
/// `resolveLibraryId` → `resolve-library-id`, `get_weather` → `get-weather`.
/// Other characters pass through, so `browser.navigate` stays as is.
pub fn default_tool_name_mapper(member: &str) -> Result<String, ToolNameError> {
    if member.is_empty() {
        return Err(ToolNameError::Empty);
    }
    Ok(kebab_case(member))
}

/// Convert an identifier to kebab-case.
///
/// Underscores become hyphens, a hyphen is inserted between a lowercase
/// letter or digit and a following uppercase letter, then everything is
/// lowercased. Runs of uppercase letters stay together (`getURL` → `get-url`).
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for c in name.chars() {
        let c = if c == '_' { '-' } else { c };
        if c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push('-');
        }
        out.extend(c.to_lowercase());
        prev = Some(c);
    }

    out
}

pub(crate) fn default_mapper() -> ToolNameMapper {
    Arc::new(default_tool_name_mapper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_to_kebab() {
        assert_eq!(kebab_case("resolveLibraryId"), "resolve-library-id");
        assert_eq!(kebab_case("someTool"), "some-tool");
        assert_eq!(kebab_case("getLibraryDocs"), "get-library-docs");
    }

    #[test]
    fn test_underscores_and_digits() {
        assert_eq!(kebab_case("get_weather"), "get-weather");
        assert_eq!(kebab_case("take2Screenshots"), "take2-screenshots");
        assert_eq!(kebab_case("v2Api"), "v2-api");
    }

    #[test]
    fn test_uppercase_runs() {
        assert_eq!(kebab_case("getURL"), "get-url");
        assert_eq!(kebab_case("HTTPServer"), "httpserver");
    }

    #[test]
    fn test_already_kebab() {
        assert_eq!(kebab_case("resolve-library-id"), "resolve-library-id");
    }

    #[test]
    fn test_default_mapper_accepts_any_non_empty_name() {
        assert_eq!(default_tool_name_mapper(""), Err(ToolNameError::Empty));
        assert_eq!(
            default_tool_name_mapper("browser.navigate").unwrap(),
            "browser.navigate"
        );
        assert_eq!(default_tool_name_mapper("naïveSearch").unwrap(), "naïve-search");
        assert_eq!(default_tool_name_mapper("tool name").unwrap(), "tool name");
        assert_eq!(
            default_tool_name_mapper("resolveLibraryId").unwrap(),
            "resolve-library-id"
        );
    }
}
