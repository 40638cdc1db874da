//! Tool runtime trait.
//!
//! This module defines the abstraction over the component that actually talks
//! to tool servers (process supervision, transports, JSON-RPC framing).

use async_trait::async_trait;
use serde_json::Value;

use super::ToolRuntimeError;
use crate::domain::mcp::{CallOptions, ListToolsOptions, ToolDescriptor};

/// Runtime that lists and calls tools on named servers.
///
/// # Design Rules
///
/// - Servers are addressed by their configured name
/// - Tool names are passed through exactly as given; no mapping happens here
/// - Call results are opaque JSON; presentation is the caller's concern
///
/// # Example
///
/// ```ignore
/// let tools = runtime
///     .list_tools("context7", ListToolsOptions::with_schema())
///     .await?;
///
/// let result = runtime
///     .call_tool("context7", "resolve-library-id", CallOptions::new().with_args(args))
///     .await?;
/// ```
#[async_trait]
pub trait ToolRuntime: Send + Sync {
    /// List the tools exposed by a server.
    ///
    /// Ordering of the returned descriptors is not significant.
    async fn list_tools(
        &self,
        server: &str,
        options: ListToolsOptions,
    ) -> Result<Vec<ToolDescriptor>, ToolRuntimeError>;

    /// Call a tool on a server and return its raw result.
    async fn call_tool(
        &self,
        server: &str,
        tool: &str,
        options: CallOptions,
    ) -> Result<Value, ToolRuntimeError>;
}
