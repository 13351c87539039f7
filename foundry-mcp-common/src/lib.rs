//! Foundry MCP Common Library
//!
//! Shared configuration, credentials, blob storage, model definitions,
//! error handling, tracing and transport plumbing for the Foundry MCP servers.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod auth;
pub mod blob;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod tracing;
pub mod transport;


pub use auth::Secret;
pub use blob::{BlobClient, BlobPath, BlobStore};
pub use config::{Config, Credentials, StorageConfig};
pub use error::{ConfigError, Error, Result, StorageError, StorageOperation};
pub use models::{ImageModel, ModelRegistry};
pub use server::{McpServerBuilder, ServerError, shutdown_channel};
pub use transport::{Transport, TransportArgs, TransportMode};
