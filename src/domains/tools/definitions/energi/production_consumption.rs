//! Hourly production and consumption settlement
//! (`ProductionConsumptionSettlement`).

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
use super::format::{
    NOT_AVAILABLE, UNKNOWN, display_value, field, format_fixed, numeric_or_zero, text_field,
};
use super::models::{DatasetRecords, Record};
use super::query::{QueryParams, price_area_filter};

const ENDPOINT: &str = "dataset/ProductionConsumptionSettlement";
const SORT: &str = "HourUTC DESC";

/// Parameters for `get_production_consumption`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ProductionConsumptionParams {
    #[schemars(description = "Optional price area filter (DK1 or DK2)")]
    #[serde(default)]
    pub price_area: Option<String>,

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

impl ProductionConsumptionParams {
    pub fn query(&self) -> QueryParams {
        let filter = self
            .price_area
            .as_deref()
            .filter(|area| !area.is_empty())
            .map(price_area_filter);

        QueryParams::with_limit(self.limit)
            .start(self.start.clone())
            .end(self.end.clone())
            .filter(filter)
            .sort(Some(SORT))
    }
}

/// Production/consumption settlement tool.
#[derive(Debug, Clone)]
pub struct ProductionConsumptionTool;

impl ProductionConsumptionTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_production_consumption";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get hourly electricity production and consumption \
        settlement data for Denmark (MWh): onshore and offshore wind, solar, and gross consumption, \
        optionally restricted to one price area (DK1 or DK2), newest first.";

    /// Execute the tool logic.
    pub async fn execute(
        params: &ProductionConsumptionParams,
        client: &EnergiClient,
    ) -> CallToolResult {
        info!(
            "Fetching production/consumption data (area: {})",
            params.price_area.as_deref().unwrap_or("all")
        );

        let query = params.query();
        match client.get::<DatasetRecords>(ENDPOINT, Some(&query)).await {
            Ok(data) => success_result(Self::render(&data.records)),
            Err(e) => error_result(&e),
        }
    }

    /// Render a block per hour with wind, solar and gross consumption.
    ///
    /// Missing wind and solar values count as zero; a missing gross
    /// consumption is shown as `N/A`.
    pub fn render(records: &[Record]) -> String {
        if records.is_empty() {
            return "No production/consumption data found.".to_string();
        }

        let mut output = vec!["Electricity Production and Consumption (MWh)\n".to_string()];

        for record in records {
            let onshore = numeric_or_zero(record, "OnshoreWindPower");
            let offshore = numeric_or_zero(record, "OffshoreWindPower");
            let solar = numeric_or_zero(record, "SolarPower");
            let gross = field(record, "GrossConsumption")
                .map(display_value)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());

            output.push(format!(
                "{} ({}):",
                text_field(record, &["HourDK", "HourUTC"], UNKNOWN),
                text_field(record, &["PriceArea"], UNKNOWN)
            ));
            output.push(format!(
                "  Wind: {} MWh (Onshore: {}, Offshore: {})",
                format_fixed(onshore + offshore, 1),
                format_fixed(onshore, 1),
                format_fixed(offshore, 1)
            ));
            output.push(format!("  Solar: {} MWh", format_fixed(solar, 1)));
            output.push(format!("  Gross Consumption: {}", gross));
            output.push(String::new());
        }

        output.join("\n")
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: &EnergiClient,
    ) -> Result<serde_json::Value, String> {
        let params: ProductionConsumptionParams = super::common::parse_http_params(arguments)?;
        let result = Self::execute(&params, client).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ProductionConsumptionParams>(),
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
                let params: ProductionConsumptionParams = parse_params(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_query_without_area() {
        let params: ProductionConsumptionParams = serde_json::from_str("{}").unwrap();
        assert_eq!(
            params.query().to_query_string(),
            "limit=24&sort=HourUTC+DESC"
        );
    }

    #[test]
    fn test_query_with_area() {
        let params: ProductionConsumptionParams =
            serde_json::from_value(json!({"price_area": "DK1", "limit": 0})).unwrap();
        assert_eq!(
            params.query().to_query_string(),
            "limit=1&filter=%22PriceArea%22+%3D+%22DK1%22&sort=HourUTC+DESC"
        );
    }

    #[test]
    fn test_render_block() {
        let records = vec![record(json!({
            "HourUTC": "2024-01-01T00:00:00",
            "HourDK": "2024-01-01T01:00:00",
            "PriceArea": "DK1",
            "OnshoreWindPower": 1200.25,
            "OffshoreWindPower": 800.5,
            "SolarPower": 0,
            "GrossConsumption": 2345.678
        }))];

        assert_eq!(
            ProductionConsumptionTool::render(&records),
            "Electricity Production and Consumption (MWh)\n\
             \n\
             2024-01-01T01:00:00 (DK1):\n  \
             Wind: 2000.8 MWh (Onshore: 1200.3, Offshore: 800.5)\n  \
             Solar: 0.0 MWh\n  \
             Gross Consumption: 2345.678\n"
        );
    }

    #[test]
    fn test_missing_offshore_counts_as_zero() {
        let records = vec![record(json!({
            "HourDK": "2024-01-01T01:00:00",
            "PriceArea": "DK2",
            "OnshoreWindPower": 321.0
        }))];

        let out = ProductionConsumptionTool::render(&records);
        assert!(out.contains("  Wind: 321.0 MWh (Onshore: 321.0, Offshore: 0.0)"));
        assert!(out.contains("  Solar: 0.0 MWh"));
        assert!(out.contains("  Gross Consumption: N/A"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(
            ProductionConsumptionTool::render(&[]),
            "No production/consumption data found."
        );
    }
}
