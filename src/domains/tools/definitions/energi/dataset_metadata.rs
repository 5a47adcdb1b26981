//! Dataset metadata tool: description, record count and column listing.

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
use super::format::{UNKNOWN, display_value};
use super::models::{DatasetMetadata, DatasetMetadataEnvelope};

/// Parameters for `get_dataset_metadata`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DatasetMetadataParams {
    /// The dataset to describe.
    #[schemars(description = "The name of the dataset (e.g., 'Elspotprices', 'CO2Emis')")]
    pub dataset_name: String,
}

/// Dataset metadata tool.
#[derive(Debug, Clone)]
pub struct DatasetMetadataTool;

impl DatasetMetadataTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_dataset_metadata";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get metadata for a specific Energinet dataset including \
        its description, record count, and column names, types and descriptions.";

    /// Execute the tool logic.
    pub async fn execute(params: &DatasetMetadataParams, client: &EnergiClient) -> CallToolResult {
        info!("Fetching metadata for dataset: {}", params.dataset_name);

        let endpoint = format!("meta/{}", params.dataset_name);
        match client.get::<DatasetMetadataEnvelope>(&endpoint, None).await {
            Ok(envelope) => match envelope.into_metadata() {
                Some(metadata) => success_result(Self::render(&params.dataset_name, &metadata)),
                None => success_result(format!(
                    "No metadata found for dataset '{}'.",
                    params.dataset_name
                )),
            },
            Err(e) => error_result(&e),
        }
    }

    /// Render the metadata report.
    pub fn render(dataset_name: &str, metadata: &DatasetMetadata) -> String {
        let mut output = vec![format!("Dataset: {}", dataset_name)];

        if let Some(description) = &metadata.description {
            output.push(format!("Description: {}", description));
        }

        if let Some(count) = metadata.record_count.as_ref().filter(|c| !c.is_null()) {
            output.push(format!("Total Records: {}", display_value(count)));
        }

        if !metadata.columns.is_empty() {
            output.push("\nColumns:".to_string());
            for col in &metadata.columns {
                output.push(format!(
                    "  - {} ({}): {}",
                    col.name.as_deref().unwrap_or(UNKNOWN),
                    col.column_type.as_deref().unwrap_or(UNKNOWN),
                    col.description.as_deref().unwrap_or("No description")
                ));
            }
        }

        output.join("\n")
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: &EnergiClient,
    ) -> Result<serde_json::Value, String> {
        let params: DatasetMetadataParams = super::common::parse_http_params(arguments)?;
        let result = Self::execute(&params, client).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DatasetMetadataParams>(),
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
                let params: DatasetMetadataParams = parse_params(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}
