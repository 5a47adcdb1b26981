//! List the datasets published by Energinet Data Service.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::client::EnergiClient;
use super::common::{error_result, parse_params, success_result};
use super::format::UNKNOWN;
use super::models::{DatasetList, DatasetSummary};

/// `list_datasets` takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListDatasetsParams {}

/// Dataset catalog tool.
#[derive(Debug, Clone)]
pub struct ListDatasetsTool;

impl ListDatasetsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_datasets";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List all available datasets from Energinet Data Service. \
        Returns dataset names that can be queried with the query_dataset tool. Common datasets include \
        Elspotprices (day-ahead electricity spot prices), ProductionConsumptionSettlement (production and \
        consumption data), ElectricitySuppliersPerGridarea and CO2Emis (CO2 emissions from electricity \
        and heating).";

    const ENDPOINT: &'static str = "meta/dataset";

    /// Execute the tool logic.
    pub async fn execute(_params: &ListDatasetsParams, client: &EnergiClient) -> CallToolResult {
        info!("Listing datasets");

        match client.get::<DatasetList>(Self::ENDPOINT, None).await {
            Ok(list) => success_result(Self::render(&list.result)),
            Err(e) => error_result(&e),
        }
    }

    /// Render the dataset catalog.
    pub fn render(datasets: &[DatasetSummary]) -> String {
        if datasets.is_empty() {
            return "No datasets found.".to_string();
        }

        let lines: Vec<String> = datasets
            .iter()
            .map(|ds| {
                format!(
                    "- {}: {}",
                    ds.name.as_deref().unwrap_or(UNKNOWN),
                    ds.description.as_deref().unwrap_or("No description")
                )
            })
            .collect();

        format!(
            "Available datasets ({} total):\n\n{}",
            datasets.len(),
            lines.join("\n")
        )
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: &EnergiClient,
    ) -> Result<serde_json::Value, String> {
        let params: ListDatasetsParams = super::common::parse_http_params(arguments)?;
        let result = Self::execute(&params, client).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListDatasetsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(client: EnergiClient) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let client = client.clone();
            async move {
                let params: ListDatasetsParams = parse_params(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}
