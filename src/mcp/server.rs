use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    catalog::parse_file,
    config::load_config,
    forms::{FormOptions, TranslationForm},
    stats::{FailurePolicy, MemoryStore, RefreshError, ResourceLocks, StatsRefresher},
};

use super::types::{
    BuildFormParams, BuildFormResult, ConfigDto, ConfigValues, GetConfigParams,
    UpdateStatsParams, UpdateStatsResult,
};

#[derive(Clone)]
pub struct TranskitMcpServer {
    tool_router: ToolRouter<Self>,
    /// Serializes load, refresh and save of the store file.
    store_lock: Arc<Mutex<()>>,
    resource_locks: Arc<ResourceLocks>,
}

impl Default for TranskitMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl TranskitMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
            store_lock: Arc::default(),
            resource_locks: Arc::default(),
        }
    }

    /// Recompute translation statistics of resources
    #[tool(
        description = "Recompute per-language translation statistics for resources in the project's store. Pass selectors as \"<project>.<resource>\" or omit them to update every resource. Returns a refresh report."
    )]
    pub async fn update_stats(
        &self,
        params: Parameters<UpdateStatsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let root = Path::new(&params.project_root_path);

        let config = load_config(root)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?
            .config;
        let store_path = config.resolve_store_path(root);
        let policy = match params.fail_fast {
            Some(true) => FailurePolicy::FailFast,
            Some(false) => FailurePolicy::Isolate,
            None => config.failure_policy,
        };
        let selectors = params.selectors.unwrap_or_default();

        let _guard = self.store_lock.lock().await;

        let store = MemoryStore::load(&store_path)
            .map_err(|e| McpError::internal_error(format!("Failed to load store: {}", e), None))?;

        let result = StatsRefresher::new(&store)
            .policy(policy)
            .locks(Arc::clone(&self.resource_locks))
            .refresh(&selectors);

        let report = match result {
            Ok(report) => report,
            Err(err @ (RefreshError::MalformedSelector(_) | RefreshError::NoResourcesFound)) => {
                return Err(McpError::invalid_params(err.to_string(), None));
            }
            Err(err @ RefreshError::Resource { .. }) => {
                save_store(&store, &store_path)?;
                return Err(McpError::internal_error(format!("{:#}", anyhow::Error::from(err)), None));
            }
            Err(err) => {
                return Err(McpError::internal_error(
                    format!("Update failed: {}", err),
                    None,
                ));
            }
        };

        save_store(&store, &store_path)?;

        to_json_result(&UpdateStatsResult {
            store_path: store_path.to_string_lossy().to_string(),
            report,
        })
    }

    /// Build the translation form of a catalog
    #[tool(
        description = "Build the translation form of a gettext .po catalog. Returns the ordered field map (msgid, fuzzy, msgstr and changed fields per entry)."
    )]
    pub async fn build_form(
        &self,
        params: Parameters<BuildFormParams>,
    ) -> Result<CallToolResult, McpError> {
        let catalog_path = Path::new(&params.0.catalog_path);
        let config_root = catalog_path.parent().unwrap_or(Path::new("."));

        let config = load_config(config_root)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?
            .config;
        let catalog = parse_file(catalog_path)
            .map_err(|e| McpError::invalid_params(format!("Failed to parse catalog: {}", e), None))?;

        let form = TranslationForm::build_with(
            catalog.entries(),
            FormOptions {
                chars_per_row: config.chars_per_row,
            },
        );

        to_json_result(&BuildFormResult {
            catalog_path: params.0.catalog_path.clone(),
            entry_count: form.entry_count(),
            fields: form,
        })
    }

    /// Get project configuration
    #[tool(
        description = "Get the transkit configuration of a project (.transkitrc.json), or the defaults when there is none."
    )]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        to_json_result(&ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        })
    }
}

fn save_store(store: &MemoryStore, path: &Path) -> Result<(), McpError> {
    store
        .save(path)
        .map_err(|e| McpError::internal_error(format!("Failed to save store: {}", e), None))
}

fn to_json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;

    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_handler]
impl ServerHandler for TranskitMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Transkit MCP helps AI agents maintain translation statistics and edit gettext catalogs.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. update_stats - Recompute per-language statistics of resources\n\
                 3. build_form - Build the translation form of a .po catalog\n\n\
                 Statistics live in the store file named by the 'storePath' config value."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    crate::logging::init_from(log::LevelFilter::Warn, false);

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = TranskitMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
