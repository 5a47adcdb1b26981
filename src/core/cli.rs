//! Command-line flags.
//!
//! Flags take precedence over `MCP_TRANSPORT` and the other transport
//! environment variables.

use clap::Parser;
use tracing::warn;

use super::error::Result;
use super::transport::TransportConfig;

/// MCP server for Energinet's Energi Data Service
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(name = "energinet-mcp-server")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Serve JSON-RPC over HTTP instead of stdio
    #[arg(long, visible_alias = "sse", conflicts_with = "tcp")]
    pub http: bool,

    /// Serve line-delimited JSON-RPC over a raw TCP socket
    #[arg(long)]
    pub tcp: bool,

    /// Bind address for --http (default: 0.0.0.0) or --tcp (default: 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Port for --http (default: 9000) or --tcp (default: 3000)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Cli {
    /// Merge the flags into a transport configuration loaded from the
    /// environment.
    ///
    /// `--host` and `--port` are ignored when the resulting transport is
    /// STDIO.
    pub fn apply(&self, transport: TransportConfig) -> Result<TransportConfig> {
        let transport = if self.http {
            Self::select_http(transport)?
        } else if self.tcp {
            Self::select_tcp(transport)?
        } else {
            transport
        };

        if self.host.is_none() && self.port.is_none() {
            return Ok(transport);
        }

        match transport {
            #[cfg(feature = "tcp")]
            TransportConfig::Tcp(mut cfg) => {
                self.override_bind(&mut cfg.host, &mut cfg.port);
                Ok(TransportConfig::Tcp(cfg))
            }
            #[cfg(feature = "http")]
            TransportConfig::Http(mut cfg) => {
                self.override_bind(&mut cfg.host, &mut cfg.port);
                Ok(TransportConfig::Http(cfg))
            }
            #[allow(unreachable_patterns)]
            other => {
                warn!("--host and --port only apply to --http or --tcp; ignoring them");
                Ok(other)
            }
        }
    }

    #[allow(dead_code)]
    fn override_bind(&self, host: &mut String, port: &mut u16) {
        if let Some(h) = &self.host {
            *host = h.clone();
        }
        if let Some(p) = self.port {
            *port = p;
        }
    }

    #[cfg(feature = "http")]
    fn select_http(transport: TransportConfig) -> Result<TransportConfig> {
        Ok(match transport {
            TransportConfig::Http(cfg) => TransportConfig::Http(cfg),
            #[allow(unreachable_patterns)]
            _ => TransportConfig::Http(Default::default()),
        })
    }

    #[cfg(not(feature = "http"))]
    fn select_http(_transport: TransportConfig) -> Result<TransportConfig> {
        Err(super::error::Error::config("built without the `http` feature"))
    }

    #[cfg(feature = "tcp")]
    fn select_tcp(transport: TransportConfig) -> Result<TransportConfig> {
        Ok(match transport {
            TransportConfig::Tcp(cfg) => TransportConfig::Tcp(cfg),
            #[allow(unreachable_patterns)]
            _ => TransportConfig::Tcp(Default::default()),
        })
    }

    #[cfg(not(feature = "tcp"))]
    fn select_tcp(_transport: TransportConfig) -> Result<TransportConfig> {
        Err(super::error::Error::config("built without the `tcp` feature"))
    }
}
