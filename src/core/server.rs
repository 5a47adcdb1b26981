//! MCP Server implementation and lifecycle management.
//!
//! The server exposes the Energinet Data Service tools and nothing else:
//! no resources, no prompts. MCP sessions (STDIO, TCP, Streamable HTTP) are
//! routed through the rmcp `ToolRouter` built in `domains/tools/router.rs`;
//! the stateless JSON-RPC endpoint of the HTTP transport dispatches through
//! `ToolRegistry` instead.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error;
use crate::domains::tools::{EnergiClient, build_tool_router};

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

const INSTRUCTIONS: &str = "Access to Energinet's Energi Data Service, the open data platform \
for the Danish energy system. Use list_datasets and get_dataset_metadata to discover datasets, \
query_dataset for raw records, and the get_electricity_prices, get_co2_emissions and \
get_production_consumption shortcuts for the most common series. Timestamps are ISO-8601; \
price areas are DK1 (West Denmark) and DK2 (East Denmark).";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Dispatch table for the stateless JSON-RPC endpoint.
    #[cfg(feature = "http")]
    registry: ToolRegistry,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails only if the HTTP client cannot be constructed.
    pub fn new(config: Config) -> error::Result<Self> {
        let client = EnergiClient::new(&config.api)?;
        info!("Energinet API base URL: {}", client.base_url());

        Ok(Self {
            #[cfg(feature = "http")]
            registry: ToolRegistry::new(client.clone()),
            tool_router: build_tool_router::<Self>(client),
            config: Arc::new(config),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Instructions sent to clients on initialize.
    pub fn instructions() -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// Names of the registered tools.
    #[cfg(feature = "http")]
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.registry.tool_names()
    }

    /// List all available tools as `tools/list` entries.
    #[cfg(feature = "http")]
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        ToolRegistry::get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        self.registry
            .call_tool(name, arguments)
            .await
            .map_err(|e| e.to_string())
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info_tools_only() {
        let server = McpServer::new(Config::default()).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert!(info.instructions.unwrap().contains("list_datasets"));
    }

    #[test]
    fn test_router_serves_all_tools() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.tool_router.list_all().len(), 6);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_list_tools_has_schemas() {
        let server = McpServer::new(Config::default()).unwrap();
        let tools = server.list_tools();
        assert_eq!(tools.len(), server.tool_names().len());
        for tool in tools {
            assert!(tool["name"].is_string());
            assert_eq!(tool["inputSchema"]["type"], "object");
        }
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_call_unknown_tool() {
        let server = McpServer::new(Config::default()).unwrap();
        let err = server
            .call_tool("get_weather", serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(err, "Tool not found: get_weather");
    }
}
