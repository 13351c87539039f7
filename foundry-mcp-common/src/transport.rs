//! MCP transport configuration.
//!
//! Two transport modes are supported:
//!
//! - **Stdio**: Default mode for local subprocess communication
//! - **HTTP**: Streamable HTTP transport mounted under a configurable path.
//!   The default path matches the serverless host's MCP webhook route, so
//!   existing clients can point at this server unchanged.
//!
//! # Example
//!
//! ```ignore
//! use foundry_mcp_common::transport::TransportArgs;
//! use clap::Parser;
//!
//! #[derive(Parser)]
//! struct Args {
//!     #[command(flatten)]
//!     transport: TransportArgs,
//! }
//!
//! let args = Args::parse();
//! let transport = args.transport.into_transport();
//! ```

use clap::Args;
use std::fmt;

/// Default mount path for the HTTP transport.
pub const DEFAULT_MCP_PATH: &str = "/runtime/webhooks/mcp";

/// Transport mode for MCP server communication.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Transport {
    /// Standard input/output transport (default).
    #[default]
    Stdio,
    /// HTTP streamable transport.
    Http {
        /// Port to listen on
        port: u16,
        /// Path the MCP service is mounted under
        path: String,
    },
}

impl Transport {
    /// Create a new stdio transport.
    pub fn stdio() -> Self {
        Transport::Stdio
    }

    /// Create a new HTTP transport on the specified port, mounted at the
    /// default path.
    pub fn http(port: u16) -> Self {
        Transport::Http {
            port,
            path: DEFAULT_MCP_PATH.to_string(),
        }
    }

    /// Check if this is a stdio transport.
    pub fn is_stdio(&self) -> bool {
        matches!(self, Transport::Stdio)
    }

    /// Check if this is an HTTP transport.
    pub fn is_http(&self) -> bool {
        matches!(self, Transport::Http { .. })
    }

    /// Get the port if this is a network transport.
    pub fn port(&self) -> Option<u16> {
        match self {
            Transport::Stdio => None,
            Transport::Http { port, .. } => Some(*port),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Stdio => write!(f, "stdio"),
            Transport::Http { port, path } => write!(f, "http (port {}, path {})", port, path),
        }
    }
}

/// Command-line arguments for transport configuration.
#[derive(Args, Debug, Clone)]
pub struct TransportArgs {
    /// Transport mode: stdio or http
    #[arg(long, default_value = "stdio", value_parser = parse_transport_mode)]
    pub transport: TransportMode,

    /// Port for HTTP transport (default: 8080, or from PORT env var)
    #[arg(long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Path the HTTP transport is mounted under
    #[arg(long, default_value = DEFAULT_MCP_PATH, value_parser = parse_mount_path)]
    pub path: String,
}

/// Transport mode parsed from command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportMode {
    #[default]
    Stdio,
    Http,
}

fn parse_transport_mode(s: &str) -> Result<TransportMode, String> {
    match s.to_lowercase().as_str() {
        "stdio" => Ok(TransportMode::Stdio),
        "http" => Ok(TransportMode::Http),
        _ => Err(format!(
            "Invalid transport mode '{}'. Valid options: stdio, http",
            s
        )),
    }
}

fn parse_mount_path(s: &str) -> Result<String, String> {
    let trimmed = s.trim_end_matches('/');
    if !trimmed.starts_with('/') || trimmed.len() < 2 {
        return Err(format!(
            "Invalid mount path '{}'. It must start with '/' and name at least one segment",
            s
        ));
    }
    Ok(trimmed.to_string())
}

impl TransportArgs {
    /// Convert command-line arguments into a Transport configuration.
    pub fn into_transport(self) -> Transport {
        match self.transport {
            TransportMode::Stdio => Transport::Stdio,
            TransportMode::Http => Transport::Http {
                port: self.port,
                path: self.path,
            },
        }
    }
}

impl Default for TransportArgs {
    fn default() -> Self {
        Self {
            transport: TransportMode::Stdio,
            port: 8080,
            path: DEFAULT_MCP_PATH.to_string(),
        }
    }
}
