//! Day-ahead electricity spot prices (`Elspotprices`).

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
use super::query::{QueryParams, price_area_filter};

const DATASET: &str = "Elspotprices";
const COLUMNS: &str = "HourUTC,HourDK,PriceArea,SpotPriceDKK,SpotPriceEUR";
const SORT: &str = "HourUTC DESC";

fn default_price_area() -> String {
    "DK1".to_string()
}

/// Parameters for `get_electricity_prices`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ElectricityPricesParams {
    #[schemars(
        description = "Price area to query: DK1 (Western Denmark) or DK2 (Eastern Denmark). Default: DK1"
    )]
    #[serde(default = "default_price_area")]
    pub price_area: String,

    #[schemars(description = "Maximum number of hourly records to return (default: 24, max: 100)")]
    #[serde(default = "default_series_limit")]
    pub limit: i64,

    #[schemars(description = "Start datetime for filtering (ISO format: YYYY-MM-DDTHH:MM)")]
    #[serde(default)]
    pub start: Option<String>,

    #[schemars(description = "End datetime for filtering (ISO format: YYYY-MM-DDTHH:MM)")]
    #[serde(default)]
    pub end: Option<String>,
}

impl ElectricityPricesParams {
    /// Query string for this request.
    pub fn query(&self) -> QueryParams {
        QueryParams::with_limit(self.limit)
            .start(self.start.clone())
            .end(self.end.clone())
            .filter(Some(price_area_filter(&self.price_area)))
            .columns(Some(COLUMNS))
            .sort(Some(SORT))
    }
}

/// Electricity spot price tool.
#[derive(Debug, Clone)]
pub struct ElectricityPricesTool;

impl ElectricityPricesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_electricity_prices";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get hourly day-ahead electricity spot prices for a Danish \
        price area (DK1 = Western Denmark, DK2 = Eastern Denmark), newest first. Prices are reported in \
        DKK/MWh and EUR/MWh.";

    /// Execute the tool logic.
    pub async fn execute(params: &ElectricityPricesParams, client: &EnergiClient) -> CallToolResult {
        info!("Fetching electricity prices for {}", params.price_area);

        let endpoint = format!("dataset/{}", DATASET);
        let query = params.query();
        match client.get::<DatasetRecords>(&endpoint, Some(&query)).await {
            Ok(data) => success_result(Self::render(&params.price_area, &data.records)),
            Err(e) => error_result(&e),
        }
    }

    /// Render one line per hour: `<hour>: <dkk> DKK/MWh (<eur> EUR/MWh)`.
    pub fn render(price_area: &str, records: &[Record]) -> String {
        if records.is_empty() {
            return format!("No electricity prices found for {}.", price_area);
        }

        let mut output = vec![
            format!("Electricity Spot Prices for {}", price_area),
            "(Prices in DKK/MWh and EUR/MWh)\n".to_string(),
        ];

        for record in records {
            output.push(format!(
                "{}: {} DKK/MWh ({} EUR/MWh)",
                text_field(record, &["HourDK", "HourUTC"], UNKNOWN),
                measure_field(record, "SpotPriceDKK", 2),
                measure_field(record, "SpotPriceEUR", 2)
            ));
        }

        output.join("\n")
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: &EnergiClient,
    ) -> Result<serde_json::Value, String> {
        let params: ElectricityPricesParams = super::common::parse_http_params(arguments)?;
        let result = Self::execute(&params, client).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ElectricityPricesParams>(),
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
                let params: ElectricityPricesParams = parse_params(args)?;
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
    fn test_params_defaults() {
        let params: ElectricityPricesParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.price_area, "DK1");
        assert_eq!(params.limit, 24);
    }

    #[test]
    fn test_query_fixed_parts() {
        let params: ElectricityPricesParams =
            serde_json::from_value(json!({"price_area": "DK2", "limit": 1000})).unwrap();
        let query = params.query();
        assert_eq!(query.limit(), Some(100));
        assert_eq!(
            query.to_query_string(),
            "limit=100\
             &filter=%22PriceArea%22+%3D+%22DK2%22\
             &columns=HourUTC%2CHourDK%2CPriceArea%2CSpotPriceDKK%2CSpotPriceEUR\
             &sort=HourUTC+DESC"
        );
    }

    #[test]
    fn test_negative_limit_clamps_to_one() {
        let params: ElectricityPricesParams = parse_params(
            json!({"limit": -5}).as_object().cloned().unwrap(),
        )
        .unwrap();
        assert_eq!(params.query().limit(), Some(1));
    }

    #[test]
    fn test_render_two_decimals() {
        let records = vec![
            record(json!({"HourDK": "2024-01-01T01:00:00", "SpotPriceDKK": 100.005, "SpotPriceEUR": 13.4})),
            record(json!({"HourDK": "2024-01-01T00:00:00", "SpotPriceDKK": 100.005, "SpotPriceEUR": 13.4})),
        ];

        assert_eq!(
            ElectricityPricesTool::render("DK1", &records),
            "Electricity Spot Prices for DK1\n\
             (Prices in DKK/MWh and EUR/MWh)\n\
             \n\
             2024-01-01T01:00:00: 100.01 DKK/MWh (13.40 EUR/MWh)\n\
             2024-01-01T00:00:00: 100.01 DKK/MWh (13.40 EUR/MWh)"
        );
    }

    #[test]
    fn test_render_missing_values() {
        let records = vec![record(json!({"HourUTC": "2024-01-01T00:00:00Z", "SpotPriceDKK": null}))];
        let out = ElectricityPricesTool::render("DK2", &records);
        assert!(out.ends_with("2024-01-01T00:00:00Z: N/A DKK/MWh (N/A EUR/MWh)"));

        let records = vec![record(json!({}))];
        let out = ElectricityPricesTool::render("DK2", &records);
        assert!(out.ends_with("Unknown: N/A DKK/MWh (N/A EUR/MWh)"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(
            ElectricityPricesTool::render("DK2", &[]),
            "No electricity prices found for DK2."
        );
    }
}
