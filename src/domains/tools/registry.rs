//! Tool Registry - central registration and dispatch for all tools.
//!
//! Backs the stateless JSON-RPC endpoint of the HTTP transport:
//! - Tool names and metadata for `tools/list`
//! - Dispatch of `tools/call` to each tool's `http_handler`

use rmcp::model::Tool;
use tracing::warn;

use super::ToolError;
use super::definitions::{
    Co2EmissionsTool, DatasetMetadataTool, ElectricityPricesTool, EnergiClient, ListDatasetsTool,
    ProductionConsumptionTool, QueryDatasetTool,
};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// Holds the shared API client that every dispatched call goes through.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    client: EnergiClient,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(client: EnergiClient) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            ListDatasetsTool::NAME,
            DatasetMetadataTool::NAME,
            QueryDatasetTool::NAME,
            ElectricityPricesTool::NAME,
            Co2EmissionsTool::NAME,
            ProductionConsumptionTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            ListDatasetsTool::to_tool(),
            DatasetMetadataTool::to_tool(),
            QueryDatasetTool::to_tool(),
            ElectricityPricesTool::to_tool(),
            Co2EmissionsTool::to_tool(),
            ProductionConsumptionTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// This is used by the HTTP transport to call tools.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let client = &self.client;
        let result = match name {
            ListDatasetsTool::NAME => ListDatasetsTool::http_handler(arguments, client).await,
            DatasetMetadataTool::NAME => DatasetMetadataTool::http_handler(arguments, client).await,
            QueryDatasetTool::NAME => QueryDatasetTool::http_handler(arguments, client).await,
            ElectricityPricesTool::NAME => {
                ElectricityPricesTool::http_handler(arguments, client).await
            }
            Co2EmissionsTool::NAME => Co2EmissionsTool::http_handler(arguments, client).await,
            ProductionConsumptionTool::NAME => {
                ProductionConsumptionTool::http_handler(arguments, client).await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                return Err(ToolError::not_found(name));
            }
        };

        result.map_err(ToolError::invalid_arguments)
    }
}
