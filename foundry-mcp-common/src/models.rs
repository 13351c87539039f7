//! Model family definitions and registry.
//!
//! A deployment name in Azure AI Foundry is chosen by whoever deploys the
//! model, so it says nothing about what the model accepts. The model family
//! (configured separately) carries those constraints: sizes, quality tiers,
//! image counts, and how the images/generations request must be shaped.

use serde::Serialize;

/// Image model family definition.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImageModel {
    /// Family identifier
    pub id: &'static str,
    /// Aliases accepted in configuration
    #[serde(skip)]
    pub aliases: &'static [&'static str],
    /// Supported `<width>x<height>` sizes
    pub supported_sizes: &'static [&'static str],
    /// Quality values accepted from callers
    pub supported_qualities: &'static [&'static str],
    /// Quality values rewritten before being sent to the service
    #[serde(skip)]
    pub quality_aliases: &'static [(&'static str, &'static str)],
    /// Maximum number of images per request
    pub max_images: u8,
    /// Whether `response_format: "b64_json"` must be requested explicitly
    #[serde(skip)]
    pub requests_b64_json: bool,
    /// Value for the `output_format` request field, if the family takes one
    #[serde(skip)]
    pub output_format: Option<&'static str>,
}

impl ImageModel {
    /// Map a caller-facing quality to the value the service expects.
    pub fn wire_quality<'a>(&self, quality: &'a str) -> &'a str {
        self.quality_aliases
            .iter()
            .find(|(from, _)| *from == quality)
            .map(|(_, to)| *to)
            .unwrap_or(quality)
    }

    /// Whether the family accepts the given size.
    pub fn supports_size(&self, size: &str) -> bool {
        self.supported_sizes.contains(&size)
    }

    /// Whether the family accepts the given quality.
    pub fn supports_quality(&self, quality: &str) -> bool {
        self.supported_qualities.contains(&quality)
    }
}

// =============================================================================
// Static Model Definitions
// =============================================================================

/// Black Forest Labs FLUX models served through Azure AI Foundry
pub const FLUX: ImageModel = ImageModel {
    id: "flux",
    aliases: &["flux-pro-2", "flux.2-pro", "flux-1.1-pro", "flux.1-kontext-pro", "flux-pro"],
    supported_sizes: &[
        "1024x1024", "1024x768", "768x1024", "1280x720", "720x1280",
        "1536x1024", "1024x1536", "1792x1024", "1024x1792",
    ],
    supported_qualities: &["standard", "hd"],
    quality_aliases: &[],
    max_images: 4,
    requests_b64_json: false,
    output_format: Some("png"),
};

/// OpenAI gpt-image models
pub const GPT_IMAGE: ImageModel = ImageModel {
    id: "gpt-image",
    aliases: &["gpt-image-1", "gpt-image-1-mini"],
    supported_sizes: &["1024x1024", "1536x1024", "1024x1536", "auto"],
    supported_qualities: &["standard", "hd", "low", "medium", "high", "auto"],
    quality_aliases: &[("standard", "medium"), ("hd", "high")],
    max_images: 10,
    requests_b64_json: false,
    output_format: Some("png"),
};

/// OpenAI DALL-E 3
pub const DALL_E_3: ImageModel = ImageModel {
    id: "dall-e-3",
    aliases: &["dalle-3", "dalle3", "dall-e"],
    supported_sizes: &["1024x1024", "1792x1024", "1024x1792"],
    supported_qualities: &["standard", "hd"],
    quality_aliases: &[],
    max_images: 1,
    requests_b64_json: true,
    output_format: None,
};

/// All known image model families
pub const IMAGE_MODELS: &[ImageModel] = &[FLUX, GPT_IMAGE, DALL_E_3];

/// Family used when none is configured.
pub const DEFAULT_MODEL_FAMILY: &ImageModel = &FLUX;

// =============================================================================
// Model Registry
// =============================================================================

/// Model registry for resolution and listing.
pub struct ModelRegistry;

impl ModelRegistry {
    /// Resolve a family name or alias, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use foundry_mcp_common::models::ModelRegistry;
    ///
    /// assert_eq!(ModelRegistry::resolve("flux-pro-2").map(|m| m.id), Some("flux"));
    /// assert_eq!(ModelRegistry::resolve("DALL-E-3").map(|m| m.id), Some("dall-e-3"));
    /// assert!(ModelRegistry::resolve("stable-diffusion").is_none());
    /// ```
    pub fn resolve(name: &str) -> Option<&'static ImageModel> {
        let name = name.trim().to_ascii_lowercase();
        IMAGE_MODELS
            .iter()
            .find(|model| model.id == name || model.aliases.contains(&name.as_str()))
    }

    /// List every known family.
    pub fn list() -> &'static [ImageModel] {
        IMAGE_MODELS
    }
}
