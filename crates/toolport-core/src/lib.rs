//! Core domain types and port definitions for toolport.
//!
//! `toolport-core` has no I/O of its own. It defines the tool, schema,
//! lifecycle and connection-issue types shared by the rest of the workspace,
//! plus the [`ToolRuntime`] port that transports implement.
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    CallOptions, ConnectionIssue, ConnectionIssueKind, LifecycleDirective, LifecycleMode,
    LifecycleSpec, ListToolsOptions, ObjectSchema, PropertySchema, SchemaNode,
    ServerCommandSignature, ToolDescriptor, TransportKind,
};
pub use ports::{ToolRuntime, ToolRuntimeError, UnauthorizedError};
