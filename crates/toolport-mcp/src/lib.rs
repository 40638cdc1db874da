//! Tool server client plumbing for toolport.
//!
//! - [`proxy`]: call a server's tools by member name, with schema defaults
//!   and required-argument checks applied before dispatch
//! - [`lifecycle`]: decide whether a server connection is kept alive
//! - [`classify`]: sort connection failures into auth, offline and other
//!
//! All runtime access goes through the [`ToolRuntime`] port from
//! `toolport-core`; this crate carries no transport of its own.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod classify;
pub mod lifecycle;
pub mod naming;
pub mod proxy;

// Re-export domain types from core for convenience
pub use toolport_core::{
    CallOptions, ConnectionIssue, ConnectionIssueKind, LifecycleDirective, LifecycleMode,
    LifecycleSpec, ListToolsOptions, ServerCommandSignature, ToolDescriptor, ToolRuntime,
    ToolRuntimeError, TransportKind, UnauthorizedError,
};

// Re-export this crate's public types
pub use classify::{Failure, classify, is_auth_issue};
pub use lifecycle::{KeepAliveOverrides, LifecycleResolver, resolve_lifecycle};
pub use naming::{ToolNameError, ToolNameMapper, default_tool_name_mapper};
pub use proxy::{ProxyError, ServerProxy, ToolHandle};

#[cfg(test)]
use mockall as _;
