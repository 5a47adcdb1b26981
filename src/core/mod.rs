//! Core module containing shared infrastructure components.
//!
//! Configuration, command-line flags, error handling, the MCP server
//! handler, and the transport layer.

pub mod cli;
pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use cli::Cli;
pub use config::{ApiConfig, Config};
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
