//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients; here
//! each one maps to a query against the Energinet Data Service API.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Central tool registry and HTTP dispatch (http feature)
//! - `error.rs` - Tool-specific error types (http feature)
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/energi/` (e.g., `my_tool.rs`)
//! 2. Define params, execute(), and http_handler()
//! 3. Export in `definitions/energi/mod.rs`
//! 4. Add route in `router.rs` using `with_route()`
//! 5. Register in `registry.rs` for HTTP support

pub mod definitions;
#[cfg(feature = "http")]
mod error;
#[cfg(feature = "http")]
mod registry;
pub mod router;

pub use definitions::energi::{ApiError, EnergiClient};
#[cfg(feature = "http")]
pub use error::ToolError;
#[cfg(feature = "http")]
pub use registry::ToolRegistry;
pub use router::build_tool_router;
