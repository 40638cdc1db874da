//! Server proxy: call remote tools as if they were local methods.
//!
//! A [`ServerProxy`] is bound to one server. Tools are invoked by member name
//! (`resolveLibraryId`), which is mapped to the server's tool name
//! (`resolve-library-id`). Before dispatch the proxy looks up the tool's input
//! schema, fills in declared defaults and rejects calls missing required
//! arguments.
//!
//! # Example
//!
//! ```ignore
//! let context7 = ServerProxy::new(runtime, "context7");
//!
//! let result = context7
//!     .invoke("resolveLibraryId", Some(json!({ "libraryName": "react" })), None)
//!     .await?;
//!
//! // Or bind the tool once and call it repeatedly
//! let resolve = context7.tool("resolveLibraryId")?;
//! let result = resolve.call(Some(json!({ "libraryName": "vue" }))).await?;
//! ```

mod args;
pub mod normalize;
mod schema;

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use toolport_core::{CallOptions, ListToolsOptions, ToolDescriptor, ToolRuntime, ToolRuntimeError};

use crate::naming::{ToolNameError, ToolNameMapper, default_mapper};
use args::assemble_options;
pub use normalize::{ValidationError, apply_defaults, validate_required};
use schema::SchemaCache;

/// Errors returned by proxy calls.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The member name could not be mapped to a tool name.
    #[error(transparent)]
    ToolName(#[from] ToolNameError),

    /// Required arguments were missing; nothing was dispatched.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The runtime failed; propagated unchanged.
    #[error(transparent)]
    Runtime(#[from] ToolRuntimeError),
}

/// Dynamic-dispatch facade over one tool server.
pub struct ServerProxy {
    runtime: Arc<dyn ToolRuntime>,
    server_name: Arc<str>,
    mapper: ToolNameMapper,
    schemas: SchemaCache,
}

impl ServerProxy {
    /// Create a proxy with an empty schema cache and the default name mapping.
    pub fn new(runtime: Arc<dyn ToolRuntime>, server_name: impl Into<String>) -> Self {
        let server_name: Arc<str> = Arc::from(server_name.into());
        let mapper = default_mapper();
        let schemas = SchemaCache::new(
            Arc::clone(&runtime),
            Arc::clone(&server_name),
            Arc::clone(&mapper),
        );

        Self {
            runtime,
            server_name,
            mapper,
            schemas,
        }
    }

    /// Replace the member-name to tool-name mapping.
    ///
    /// Resets the schema cache, since cached entries are keyed by mapped names.
    #[must_use]
    pub fn with_name_mapper<F>(mut self, mapper: F) -> Self
    where
        F: Fn(&str) -> Result<String, ToolNameError> + Send + Sync + 'static,
    {
        self.mapper = Arc::new(mapper);
        self.schemas = SchemaCache::new(
            Arc::clone(&self.runtime),
            Arc::clone(&self.server_name),
            Arc::clone(&self.mapper),
        );
        self
    }

    /// Name of the server this proxy is bound to.
    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Call a tool by its exact server-side name.
    ///
    /// No name mapping, defaulting or validation is applied.
    pub async fn call(
        &self,
        tool_name: &str,
        options: Option<CallOptions>,
    ) -> Result<Value, ProxyError> {
        self.dispatch(tool_name, options.unwrap_or_default()).await
    }

    /// List the server's tools.
    pub async fn list_tools(
        &self,
        options: Option<ListToolsOptions>,
    ) -> Result<Vec<ToolDescriptor>, ProxyError> {
        let tools = self
            .runtime
            .list_tools(&self.server_name, options.unwrap_or_default())
            .await?;
        Ok(tools)
    }

    /// Bind a member name to a callable tool handle.
    pub fn tool(&self, member: &str) -> Result<ToolHandle<'_>, ToolNameError> {
        let tool_name = (self.mapper)(member)?;
        Ok(ToolHandle {
            proxy: self,
            tool_name,
        })
    }

    /// Invoke a tool by member name.
    ///
    /// `first` is either the tool arguments or, when it is an object with an
    /// `args` key and `second` is absent, a full options bag. An object
    /// `second` supplies passthrough options.
    pub async fn invoke(
        &self,
        member: &str,
        first: Option<Value>,
        second: Option<Value>,
    ) -> Result<Value, ProxyError> {
        let tool_name = (self.mapper)(member)?;
        self.invoke_mapped(&tool_name, first, second).await
    }

    /// Drop cached schemas so the next invocation fetches them again.
    pub async fn invalidate_schemas(&self) {
        self.schemas.invalidate().await;
    }

    async fn invoke_mapped(
        &self,
        tool_name: &str,
        first: Option<Value>,
        second: Option<Value>,
    ) -> Result<Value, ProxyError> {
        let mut options = assemble_options(first, second);

        let schema = match self.schemas.get(tool_name).await {
            Ok(schema) => schema,
            Err(e) => {
                tracing::warn!(
                    server = %self.server_name,
                    tool = %tool_name,
                    error = %e,
                    "Schema fetch failed, dispatching without validation"
                );
                None
            }
        };

        if let Some(schema) = schema {
            options.args = apply_defaults(&schema, options.args.take());
            validate_required(&schema, options.args.as_ref())?;
        }

        self.dispatch(tool_name, options).await
    }

    async fn dispatch(&self, tool_name: &str, options: CallOptions) -> Result<Value, ProxyError> {
        tracing::debug!(server = %self.server_name, tool = %tool_name, "Dispatching tool call");
        let result = self
            .runtime
            .call_tool(&self.server_name, tool_name, options)
            .await?;
        Ok(result)
    }
}

impl std::fmt::Debug for ServerProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerProxy")
            .field("server_name", &self.server_name)
            .finish_non_exhaustive()
    }
}

/// A tool bound to a proxy under its mapped name.
#[derive(Debug, Clone)]
pub struct ToolHandle<'a> {
    proxy: &'a ServerProxy,
    tool_name: String,
}

impl ToolHandle<'_> {
    /// The mapped tool name calls are dispatched under.
    pub fn name(&self) -> &str {
        &self.tool_name
    }

    /// Call with a single argument (tool arguments or full options bag).
    pub async fn call(&self, first: Option<Value>) -> Result<Value, ProxyError> {
        self.proxy.invoke_mapped(&self.tool_name, first, None).await
    }

    /// Call with tool arguments and passthrough options.
    pub async fn call_with(
        &self,
        first: Option<Value>,
        second: Option<Value>,
    ) -> Result<Value, ProxyError> {
        self.proxy.invoke_mapped(&self.tool_name, first, second).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRuntime {
        tools: Vec<ToolDescriptor>,
        calls: Mutex<Vec<(String, String, CallOptions)>>,
        listings: Mutex<usize>,
    }

    #[async_trait]
    impl ToolRuntime for RecordingRuntime {
        async fn list_tools(
            &self,
            _server: &str,
            _options: ListToolsOptions,
        ) -> Result<Vec<ToolDescriptor>, ToolRuntimeError> {
            *self.listings.lock().unwrap() += 1;
            Ok(self.tools.clone())
        }

        async fn call_tool(
            &self,
            server: &str,
            tool: &str,
            options: CallOptions,
        ) -> Result<Value, ToolRuntimeError> {
            let raw = options.to_json();
            self.calls
                .lock()
                .unwrap()
                .push((server.to_string(), tool.to_string(), options));
            Ok(raw)
        }
    }

    #[tokio::test]
    async fn test_explicit_call_skips_mapping_and_schema() {
        let runtime = Arc::new(RecordingRuntime::default());
        let proxy = ServerProxy::new(runtime.clone(), "docs");

        let result = proxy.call("getLibraryDocs", None).await.unwrap();

        assert_eq!(result, json!({}));
        assert_eq!(*runtime.listings.lock().unwrap(), 0);
        let calls = runtime.calls.lock().unwrap();
        assert_eq!(calls[0].1, "getLibraryDocs");
        assert_eq!(calls[0].2, CallOptions::new());
    }

    #[tokio::test]
    async fn test_list_tools_passthrough() {
        let runtime = Arc::new(RecordingRuntime {
            tools: vec![ToolDescriptor::new("ping")],
            ..Default::default()
        });
        let proxy = ServerProxy::new(runtime.clone(), "docs");

        let tools = proxy.list_tools(None).await.unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(*runtime.listings.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_tool_handle_uses_mapped_name() {
        let runtime = Arc::new(RecordingRuntime::default());
        let proxy = ServerProxy::new(runtime.clone(), "docs");

        let handle = proxy.tool("getLibraryDocs").unwrap();
        assert_eq!(handle.name(), "get-library-docs");

        handle
            .call_with(Some(json!({ "id": "/react" })), Some(json!({ "tailLog": true })))
            .await
            .unwrap();

        let calls = runtime.calls.lock().unwrap();
        assert_eq!(calls[0].1, "get-library-docs");
        assert_eq!(calls[0].2.to_json(), json!({ "args": { "id": "/react" }, "tailLog": true }));
    }

    #[tokio::test]
    async fn test_invalid_member_name() {
        let runtime = Arc::new(RecordingRuntime::default());
        let proxy = ServerProxy::new(runtime.clone(), "docs");

        let err = proxy.invoke("", None, None).await.unwrap_err();
        assert!(matches!(err, ProxyError::ToolName(ToolNameError::Empty)));
        assert!(runtime.calls.lock().unwrap().is_empty());
        assert_eq!(*runtime.listings.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_custom_name_mapper() {
        let runtime = Arc::new(RecordingRuntime::default());
        let proxy = ServerProxy::new(runtime.clone(), "docs")
            .with_name_mapper(|member| Ok(member.to_uppercase()));

        proxy.invoke("search", Some(json!({})), None).await.unwrap();

        assert_eq!(runtime.calls.lock().unwrap()[0].1, "SEARCH");
    }

    #[tokio::test]
    async fn test_schema_fetched_once_across_calls() {
        let runtime = Arc::new(RecordingRuntime {
            tools: vec![ToolDescriptor::new("search")
                .with_input_schema(json!({ "type": "object", "properties": { "limit": { "default": 5 } } }))],
            ..Default::default()
        });
        let proxy = ServerProxy::new(runtime.clone(), "docs");

        proxy.invoke("search", None, None).await.unwrap();
        proxy.invoke("unknownTool", Some(json!({ "a": 1 })), None).await.unwrap();

        assert_eq!(*runtime.listings.lock().unwrap(), 1);
        let calls = runtime.calls.lock().unwrap();
        assert_eq!(calls[0].2.args, Some(json!({ "limit": 5 })));
        assert_eq!(calls[1].2.args, Some(json!({ "a": 1 })));
    }

    #[tokio::test]
    async fn test_invalidate_refetches() {
        let runtime = Arc::new(RecordingRuntime::default());
        let proxy = ServerProxy::new(runtime.clone(), "docs");

        proxy.invoke("search", None, None).await.unwrap();
        proxy.invalidate_schemas().await;
        proxy.invoke("search", None, None).await.unwrap();

        assert_eq!(*runtime.listings.lock().unwrap(), 2);
    }
}
