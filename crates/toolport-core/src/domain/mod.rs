//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (transports, processes, credentials, etc.).
//!
//! # Structure
//!
//! - `mcp` - Tool, schema, lifecycle and connection issue types

pub mod mcp;

// Re-export MCP types at the domain level for convenience
pub use mcp::{
    CallOptions, ConnectionIssue, ConnectionIssueKind, LifecycleDirective, LifecycleMode,
    LifecycleSpec, ListToolsOptions, ObjectSchema, PropertySchema, SchemaNode,
    ServerCommandSignature, ToolDescriptor, TransportKind,
};
