//! Energinet Data Service tools.
//!
//! This module provides tools querying the public Energinet Data Service API
//! (<https://www.energidataservice.dk/>):
//! - `list_datasets`: the dataset catalog
//! - `dataset_metadata`: description and columns of one dataset
//! - `query_dataset`: generic paged query against any dataset
//! - `electricity_prices`, `co2_emissions`, `production_consumption`:
//!   convenience queries over well-known datasets
//!
//! All tools share one [`EnergiClient`] which performs the HTTP call, and the
//! text helpers in `format`.

pub mod client;
pub mod co2_emissions;
pub mod common;
pub mod dataset_metadata;
pub mod electricity_prices;
pub mod format;
pub mod list_datasets;
pub mod models;
pub mod production_consumption;
pub mod query;
pub mod query_dataset;

pub use client::{ApiError, ApiResult, EnergiClient};
pub use co2_emissions::{Co2EmissionsParams, Co2EmissionsTool};
pub use dataset_metadata::{DatasetMetadataParams, DatasetMetadataTool};
pub use electricity_prices::{ElectricityPricesParams, ElectricityPricesTool};
pub use format::format_records;
pub use list_datasets::{ListDatasetsParams, ListDatasetsTool};
pub use production_consumption::{ProductionConsumptionParams, ProductionConsumptionTool};
pub use query::QueryParams;
pub use query_dataset::{QueryDatasetParams, QueryDatasetTool};
