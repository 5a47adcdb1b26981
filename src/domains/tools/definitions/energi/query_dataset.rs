//! Generic dataset query tool.
//!
//! Forwards the caller's filter, column, sort and time-range arguments to
//! `dataset/{name}` and renders the returned rows with the record formatter.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::client::EnergiClient;
use super::common::{default_query_limit, error_result, parse_params, success_result};
use super::format::format_records;
use super::models::DatasetRecords;
use super::query::{QueryParams, clamp_limit};

/// Parameters for `query_dataset`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryDatasetParams {
    #[schemars(description = "The name of the dataset to query (e.g., 'Elspotprices', 'CO2Emis')")]
    pub dataset_name: String,

    #[schemars(description = "Maximum number of records to return (default: 10, max: 100)")]
    #[serde(default = "default_query_limit")]
    pub limit: i64,

    #[schemars(description = "Number of records to skip for pagination (default: 0)")]
    #[serde(default)]
    pub offset: i64,

    #[schemars(description = "Start datetime for filtering (ISO format: YYYY-MM-DDTHH:MM)")]
    #[serde(default)]
    pub start: Option<String>,

    #[schemars(description = "End datetime for filtering (ISO format: YYYY-MM-DDTHH:MM)")]
    #[serde(default)]
    pub end: Option<String>,

    #[schemars(description = "Filter expression (e.g., '\"PriceArea\" = \"DK1\"')")]
    #[serde(default)]
    pub filter: Option<String>,

    #[schemars(description = "Comma-separated list of columns to include")]
    #[serde(default)]
    pub columns: Option<String>,

    #[schemars(description = "Column to sort by with direction (e.g., 'HourUTC DESC')")]
    #[serde(default)]
    pub sort: Option<String>,
}

impl QueryDatasetParams {
    /// Query string for this request.
    pub fn query(&self) -> QueryParams {
        QueryParams::with_limit(self.limit)
            .offset(self.offset)
            .start(self.start.clone())
            .end(self.end.clone())
            .filter(self.filter.clone())
            .columns(self.columns.clone())
            .sort(self.sort.clone())
    }
}

/// Dataset query tool.
#[derive(Debug, Clone)]
pub struct QueryDatasetTool;

impl QueryDatasetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "query_dataset";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Query a dataset from Energinet Data Service. Supports \
        pagination (limit/offset), a time range (start/end), filter expressions, column selection and \
        sorting. Example: dataset_name='Elspotprices', limit=5, sort='HourUTC DESC' returns the latest \
        spot prices; filter='\"PriceArea\" = \"DK1\"' restricts to Western Denmark.";

    /// Execute the tool logic.
    pub async fn execute(params: &QueryDatasetParams, client: &EnergiClient) -> CallToolResult {
        info!(
            "Querying dataset {} (limit {})",
            params.dataset_name, params.limit
        );

        let endpoint = format!("dataset/{}", params.dataset_name);
        let query = params.query();
        match client.get::<DatasetRecords>(&endpoint, Some(&query)).await {
            Ok(data) => success_result(Self::render(
                &params.dataset_name,
                &data,
                clamp_limit(params.limit),
            )),
            Err(e) => error_result(&e),
        }
    }

    /// Render the query report.
    pub fn render(dataset_name: &str, data: &DatasetRecords, max_records: usize) -> String {
        [
            format!("Dataset: {}", dataset_name),
            format!("Total matching records: {}", data.total),
            format!("Records returned: {}", data.records.len()),
            String::new(),
            format_records(&data.records, max_records),
        ]
        .join("\n")
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: &EnergiClient,
    ) -> Result<serde_json::Value, String> {
        let params: QueryDatasetParams = super::common::parse_http_params(arguments)?;
        let result = Self::execute(&params, client).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<QueryDatasetParams>(),
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
                let params: QueryDatasetParams = parse_params(args)?;
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

    #[test]
    fn test_params_defaults() {
        let params: QueryDatasetParams =
            serde_json::from_str(r#"{"dataset_name": "Elspotprices"}"#).unwrap();
        assert_eq!(params.limit, 10);
        assert_eq!(params.offset, 0);
        assert!(params.start.is_none());
        assert_eq!(params.query().to_query_string(), "limit=10");
    }

    #[test]
    fn test_query_clamps_and_forwards() {
        let params: QueryDatasetParams = serde_json::from_value(json!({
            "dataset_name": "Elspotprices",
            "limit": 500,
            "offset": 100,
            "sort": "HourUTC DESC",
            "columns": ""
        }))
        .unwrap();
        let query = params.query();
        assert_eq!(query.limit(), Some(100));
        assert_eq!(
            query.to_query_string(),
            "limit=100&offset=100&sort=HourUTC+DESC"
        );
    }

    #[test]
    fn test_negative_limit_and_offset_accepted() {
        let params: QueryDatasetParams = serde_json::from_value(json!({
            "dataset_name": "CO2Emis",
            "limit": -5,
            "offset": -3
        }))
        .unwrap();
        assert_eq!(params.query().to_query_string(), "limit=1");
    }

    #[test]
    fn test_render_report() {
        let data: DatasetRecords = serde_json::from_value(json!({
            "total": 8760,
            "records": [
                {"HourDK": "2024-01-01T00:00:00", "PriceArea": "DK1"},
                {"HourDK": "2024-01-01T01:00:00", "PriceArea": "DK1"}
            ]
        }))
        .unwrap();

        assert_eq!(
            QueryDatasetTool::render("Elspotprices", &data, 1),
            "Dataset: Elspotprices\n\
             Total matching records: 8760\n\
             Records returned: 2\n\
             \n\
             Record 1:\n  HourDK: 2024-01-01T00:00:00\n  PriceArea: DK1\n\
             \n... and 1 more records"
        );
    }

    #[test]
    fn test_render_empty() {
        let data = DatasetRecords::default();
        let out = QueryDatasetTool::render("CO2Emis", &data, 10);
        assert!(out.starts_with("Dataset: CO2Emis\nTotal matching records: 0\nRecords returned: 0"));
        assert!(out.ends_with("No records found."));
    }
}
