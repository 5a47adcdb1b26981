//! Transport layer for the MCP server.
//!
//! - **STDIO**: standard input/output, the default MCP mode (feature `stdio`)
//! - **TCP**: raw TCP socket with line-delimited JSON-RPC (feature `tcp`)
//! - **HTTP**: JSON-RPC over POST requests (feature `http`)
//!
//! Each transport handles the connection lifecycle and delegates message
//! processing to [`McpServer`](crate::core::McpServer).

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::{DEFAULT_TCP_PORT, TcpConfig};

#[cfg(feature = "http")]
pub use config::{DEFAULT_HTTP_PORT, HttpConfig};
