//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! This module builds the ToolRouter for STDIO/TCP transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    Co2EmissionsTool, DatasetMetadataTool, ElectricityPricesTool, EnergiClient, ListDatasetsTool,
    ProductionConsumptionTool, QueryDatasetTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: EnergiClient) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(ListDatasetsTool::create_route(client.clone()))
        .with_route(DatasetMetadataTool::create_route(client.clone()))
        .with_route(QueryDatasetTool::create_route(client.clone()))
        .with_route(ElectricityPricesTool::create_route(client.clone()))
        .with_route(Co2EmissionsTool::create_route(client.clone()))
        .with_route(ProductionConsumptionTool::create_route(client))
}
