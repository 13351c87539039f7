//! MCP Resources for the Image server.
//!
//! - `image://options` - model families, their sizes, qualities and image
//!   limits, plus the deployment this server is configured for

use foundry_mcp_common::config::Config;
use foundry_mcp_common::models::ModelRegistry;
use serde::Serialize;

/// URI of the options resource.
pub const OPTIONS_URI: &str = "image://options";

/// Generation options of one model family.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    /// Family identifier
    pub id: &'static str,
    /// Deployment names that resolve to this family
    pub aliases: Vec<&'static str>,
    /// Supported output sizes
    pub supported_sizes: Vec<&'static str>,
    /// Supported quality tiers
    pub supported_qualities: Vec<&'static str>,
    /// Maximum number of images per request
    pub max_images: u8,
}

/// Contents of `image://options`.
#[derive(Debug, Clone, Serialize)]
pub struct ImageOptions {
    /// Deployment requests are sent to
    pub deployment: String,
    /// Family that validates requests
    pub active_model: &'static str,
    /// Every known family
    pub models: Vec<ModelInfo>,
}

/// List all known model families.
pub fn list_models() -> Vec<ModelInfo> {
    ModelRegistry::list()
        .iter()
        .map(|m| ModelInfo {
            id: m.id,
            aliases: m.aliases.to_vec(),
            supported_sizes: m.supported_sizes.to_vec(),
            supported_qualities: m.supported_qualities.to_vec(),
            max_images: m.max_images,
        })
        .collect()
}

/// Options for the configured deployment.
pub fn image_options(config: &Config) -> ImageOptions {
    ImageOptions {
        deployment: config.deployment_name.clone(),
        active_model: config.model.id,
        models: list_models(),
    }
}

/// Get the options resource as a JSON string.
pub fn options_resource_json(config: &Config) -> String {
    serde_json::to_string_pretty(&image_options(config)).unwrap_or_else(|_| "{}".to_string())
}
