//! Tracing initialization for the MCP servers.
//!
//! Logs are written to stderr: with the stdio transport, stdout carries the
//! MCP protocol stream and must not receive anything else.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Controls the log level and filtering. Examples:
//!   - `RUST_LOG=debug` - Enable debug logging for all modules
//!   - `RUST_LOG=foundry_mcp_image=debug` - Enable debug for the image server
//!   - `RUST_LOG=warn,foundry_mcp_common=debug` - Warn by default, debug for common

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
    util::TryInitError,
};

fn registry(default_level: &str) -> impl tracing::Subscriber + Send + Sync + 'static {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry().with(env_filter).with(fmt_layer)
}

/// Initialize the tracing subscriber, defaulting to `info` when `RUST_LOG`
/// is not set.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
///
/// ```no_run
/// use foundry_mcp_common::tracing::init_tracing;
///
/// init_tracing();
/// tracing::info!("Server starting");
/// ```
pub fn init_tracing() {
    init_tracing_with_default("info");
}

/// Initialize tracing with a custom default level.
pub fn init_tracing_with_default(default_level: &str) {
    registry(default_level).init();
}

/// Try to initialize tracing, returning an error if already initialized.
///
/// ```
/// use foundry_mcp_common::tracing::try_init_tracing;
///
/// // Ok or Err depending on prior initialization, never a panic
/// let _ = try_init_tracing();
/// ```
pub fn try_init_tracing() -> Result<(), TryInitError> {
    registry("info").try_init()
}
