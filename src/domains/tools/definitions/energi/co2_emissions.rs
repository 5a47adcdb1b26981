//! CO2 emission intensity of electricity production (`CO2Emis`).

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::client::EnergiClient;
use super::common::{default_series_limit, error_result, parse_params, success_result};
use super::format::{UNKNOWN, measure_field, text_field};
use super::models::{DatasetRecords, Record};
use super::query::QueryParams;

const ENDPOINT: &str = "dataset/CO2Emis";
const SORT: &str = "Minutes5UTC DESC";

/// Parameters for `get_co2_emissions`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct Co2EmissionsParams {
    #[schemars(description = "Maximum number of records to return (default: 24, max: 100)")]
    #[serde(default = "default_series_limit")]
    pub limit: i64,

    #[schemars(description = "Start datetime for filtering (ISO format: YYYY-MM-DDTHH:MM)")]
    #[serde(default)]
    pub start: Option<String>,

    #[schemars(description = "End datetime for filtering (ISO format: YYYY-MM-DDTHH:MM)")]
    #[serde(default)]
    pub end: Option<String>,
}

impl Co2EmissionsParams {
    pub fn query(&self) -> QueryParams {
        QueryParams::with_limit(self.limit)
            .start(self.start.clone())
            .end(self.end.clone())
            .sort(Some(SORT))
    }
}

/// CO2 emission intensity tool.
#[derive(Debug, Clone)]
pub struct Co2EmissionsTool;

impl Co2EmissionsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_co2_emissions";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get CO2 emission intensity (g/kWh) of electricity \
        production in Denmark per price area, in 5-minute resolution, newest first.";

    /// Execute the tool logic.
    pub async fn execute(params: &Co2EmissionsParams, client: &EnergiClient) -> CallToolResult {
        info!("Fetching CO2 emissions (limit {})", params.limit);

        let query = params.query();
        match client.get::<DatasetRecords>(ENDPOINT, Some(&query)).await {
            Ok(data) => success_result(Self::render(&data.records)),
            Err(e) => error_result(&e),
        }
    }

    /// Render one line per interval: `<time> (<area>): <co2> g/kWh`.
    pub fn render(records: &[Record]) -> String {
        if records.is_empty() {
            return "No CO2 emission data found.".to_string();
        }

        let mut output = vec!["CO2 Emission Intensity (g CO2/kWh)\n".to_string()];
        output.extend(records.iter().map(|record| {
            format!(
                "{} ({}): {} g/kWh",
                text_field(record, &["Minutes5DK", "Minutes5UTC"], UNKNOWN),
                text_field(record, &["PriceArea"], UNKNOWN),
                measure_field(record, "CO2Emission", 1)
            )
        }));

        output.join("\n")
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: &EnergiClient,
    ) -> Result<serde_json::Value, String> {
        let params: Co2EmissionsParams = super::common::parse_http_params(arguments)?;
        let result = Self::execute(&params, client).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Co2EmissionsParams>(),
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
                let params: Co2EmissionsParams = parse_params(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}
