//! Per-proxy tool schema cache.
//!
//! Schemas are fetched lazily with a single listing call. While that call is
//! pending every caller awaits the same shared future; the future installs
//! the results and clears the in-flight marker itself when it settles.

use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use toolport_core::{ListToolsOptions, SchemaNode, ToolDescriptor, ToolRuntime, ToolRuntimeError};

use crate::naming::ToolNameMapper;

/// A schema listing call failed.
///
/// Never surfaced to tool calls; the affected call goes out unvalidated and
/// the next lookup retries.
#[derive(Debug, Clone, Error)]
#[error("Failed to fetch tool schemas for '{server}': {source}")]
pub(crate) struct SchemaFetchError {
    server: Arc<str>,
    #[source]
    source: Arc<ToolRuntimeError>,
}

type SharedFetch = Shared<BoxFuture<'static, Result<(), SchemaFetchError>>>;

#[derive(Default)]
struct CacheState {
    /// Schemas keyed by both the server-reported and the mapped tool name
    entries: HashMap<String, SchemaNode>,
    /// A fetch has completed since the last invalidation
    loaded: bool,
    /// At most one listing runs at a time; cleared only by the fetch itself
    in_flight: Option<SharedFetch>,
    /// Bumped on invalidation so stale fetches don't repopulate the cache
    generation: u64,
}

pub(crate) struct SchemaCache {
    runtime: Arc<dyn ToolRuntime>,
    server: Arc<str>,
    mapper: ToolNameMapper,
    state: Arc<Mutex<CacheState>>,
}

impl SchemaCache {
    pub(crate) fn new(runtime: Arc<dyn ToolRuntime>, server: Arc<str>, mapper: ToolNameMapper) -> Self {
        Self {
            runtime,
            server,
            mapper,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    /// Look up the schema for a tool, fetching schemas if none have been loaded.
    ///
    /// `Ok(None)` means the server reported no schema for this name.
    pub(crate) async fn get(&self, tool_name: &str) -> Result<Option<SchemaNode>, SchemaFetchError> {
        loop {
            let fetch = {
                let mut state = self.state.lock().await;
                if let Some(schema) = state.entries.get(tool_name) {
                    return Ok(Some(schema.clone()));
                }
                if state.loaded {
                    return Ok(None);
                }
                match state.in_flight.clone() {
                    Some(fetch) => fetch,
                    None => {
                        let fetch = self.start_fetch(state.generation);
                        state.in_flight = Some(fetch.clone());
                        fetch
                    }
                }
            };

            // A fetch that outlived an invalidation settles without loading
            // anything; go round again and start a fresh one.
            fetch.await?;
        }
    }

    /// Drop all cached schemas; the next lookup fetches again.
    ///
    /// A pending fetch stays in flight so lookups wait for it rather than
    /// starting a second listing alongside it.
    pub(crate) async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.loaded = false;
        state.generation += 1;
    }

    fn start_fetch(&self, generation: u64) -> SharedFetch {
        let runtime = Arc::clone(&self.runtime);
        let server = Arc::clone(&self.server);
        let mapper = Arc::clone(&self.mapper);
        let state = Arc::clone(&self.state);

        async move {
            let listed = runtime
                .list_tools(&server, ListToolsOptions::with_schema())
                .await;

            let mut state = state.lock().await;
            state.in_flight = None;
            let current = state.generation == generation;

            match listed {
                Ok(tools) => {
                    if current {
                        state.entries = index_schemas(tools, &mapper);
                        state.loaded = true;
                        tracing::debug!(
                            server = %server,
                            schema_count = state.entries.len(),
                            "Cached tool schemas"
                        );
                    }
                    Ok(())
                }
                Err(e) => Err(SchemaFetchError {
                    server,
                    source: Arc::new(e),
                }),
            }
        }
        .boxed()
        .shared()
    }
}

/// Index schemas under the server-reported name and its mapped form.
fn index_schemas(tools: Vec<ToolDescriptor>, mapper: &ToolNameMapper) -> HashMap<String, SchemaNode> {
    let mut entries = HashMap::new();

    for tool in tools {
        if !tool.input_schema.is_set() {
            continue;
        }
        // Names the mapper rejects are still reachable under their raw form
        let mapped = mapper(&tool.name).ok();
        entries.insert(tool.name, tool.input_schema.clone());
        if let Some(mapped) = mapped {
            entries.insert(mapped, tool.input_schema);
        }
    }

    entries
}
