//! Energinet MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing Energinet's Energi Data
//! Service (<https://api.energidataservice.dk>) as six tools: dataset
//! discovery (`list_datasets`, `get_dataset_metadata`), a generic
//! `query_dataset`, and shortcuts for spot prices, CO2 emission intensity,
//! and production/consumption.
//!
//! # Architecture
//!
//! - **core**: configuration, CLI flags, error handling, the server handler,
//!   and the STDIO / TCP / HTTP transports
//! - **domains::tools**: the Energinet API client, response models, text
//!   formatting, and one module per tool
//!
//! # Example
//!
//! ```rust,no_run
//! use energinet_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
