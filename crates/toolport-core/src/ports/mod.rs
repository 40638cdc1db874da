//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No transport types in any signature
//! - No process/filesystem implementation details
//! - Errors carry transport messages verbatim for later classification

pub mod runtime_error;
pub mod tool_runtime;

pub use runtime_error::{ToolRuntimeError, UnauthorizedError};
pub use tool_runtime::ToolRuntime;
