//! Workspace-level integration tests for the Foundry MCP image server.
//!
//! These tests verify:
//! - The server can be built from configuration and reports its capabilities
//! - Tool registration and schema generation
//! - Property-based tests for tool schema validity, input validation, and output format

pub mod input_validation;
pub mod output_format;
pub mod server_startup;
pub mod tool_schema;
