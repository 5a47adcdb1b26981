//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod energi;

pub use energi::{
    Co2EmissionsParams, Co2EmissionsTool, DatasetMetadataParams, DatasetMetadataTool,
    ElectricityPricesParams, ElectricityPricesTool, EnergiClient, ListDatasetsParams,
    ListDatasetsTool, ProductionConsumptionParams, ProductionConsumptionTool, QueryDatasetParams,
    QueryDatasetTool,
};
