//! MCP (Model Context Protocol) tool domain types.
//!
//! These types describe tool servers and their tools independent of any
//! transport concerns (process management, JSON-RPC framing, etc.).
//!
//! # Design
//!
//! - `ToolDescriptor` - A tool reported by a server's listing operation
//! - `SchemaNode` - Parsed input schema (unset, object, or opaque)
//! - `CallOptions` - Arguments plus passthrough fields for a tool call
//! - `LifecycleSpec` / `LifecycleDirective` - Connection retention policy
//! - `ServerCommandSignature` - How a server process is launched
//! - `ConnectionIssue` - A classified connection failure

mod issue;
mod lifecycle;
mod tool;

pub use issue::{ConnectionIssue, ConnectionIssueKind};
pub use lifecycle::{
    LifecycleDirective, LifecycleMode, LifecycleSpec, ServerCommandSignature, TransportKind,
};
pub use tool::{
    CallOptions, ListToolsOptions, ObjectSchema, PropertySchema, SchemaNode, ToolDescriptor,
};
