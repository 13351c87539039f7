//! Image generation client for Azure AI Foundry deployments.
//!
//! [`ImageGenerator`] is the seam between the tool handler and the hosted
//! model. [`FoundryImageClient`] implements it against the OpenAI-compatible
//! `images/generations` REST endpoint that Foundry exposes for FLUX,
//! gpt-image and DALL-E deployments.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use foundry_mcp_common::auth::{strip_query, with_api_key};
use foundry_mcp_common::config::{Config, Credentials};
use foundry_mcp_common::error::Error;
use foundry_mcp_common::models::ImageModel;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A validated, wire-ready generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Text prompt
    pub prompt: String,
    /// `<width>x<height>` size
    pub size: String,
    /// Caller-facing quality tier
    pub quality: String,
    /// Number of images to generate
    pub n: u8,
}

/// One generated image.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// Raw image bytes
    pub bytes: Vec<u8>,
    /// MIME type of the image
    pub mime_type: String,
    /// Prompt as rewritten by the service, when it reports one
    pub revised_prompt: Option<String>,
}

/// Something that can turn a prompt into images.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate images for `request`, authenticating with `credentials`.
    ///
    /// A failure for any image fails the whole call.
    async fn generate(
        &self,
        credentials: &Credentials,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedImage>, Error>;
}

/// HTTP client for an Azure OpenAI / AI Foundry image deployment.
pub struct FoundryImageClient {
    http: reqwest::Client,
    config: Config,
}

impl FoundryImageClient {
    /// Create a client for the deployment and model family in `config`.
    pub fn new(config: Config, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    fn model(&self) -> &'static ImageModel {
        self.config.model
    }

    /// Build the request body for the configured model family.
    pub fn build_body(model: &ImageModel, request: &GenerationRequest) -> ImagesRequest {
        ImagesRequest {
            prompt: request.prompt.clone(),
            size: request.size.clone(),
            quality: model.wire_quality(&request.quality).to_string(),
            n: request.n,
            response_format: model.requests_b64_json.then(|| "b64_json".to_string()),
            output_format: model.output_format.map(str::to_string),
        }
    }

    /// Fetch an image the service returned by URL.
    ///
    /// Returned URLs are often signed, so only the query-less form is logged
    /// or reported.
    async fn download(&self, url: &str) -> Result<(Vec<u8>, Option<String>), Error> {
        let location = strip_query(url);
        debug!(url = %location, "Downloading generated image");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::api(location, 0, format!("Download failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api(location, status.as_u16(), body));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .filter(|v| v.starts_with("image/"));

        let bytes = response
            .bytes()
            .await
            .map_err(|e| {
                Error::api(location, status.as_u16(), format!("Failed to read image body: {}", e.without_url()))
            })?;

        Ok((bytes.to_vec(), content_type))
    }
}

#[async_trait]
impl ImageGenerator for FoundryImageClient {
    #[instrument(level = "info", name = "foundry_generate", skip_all, fields(deployment = %self.config.deployment_name, n = request.n, size = %request.size))]
    async fn generate(
        &self,
        credentials: &Credentials,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedImage>, Error> {
        let endpoint = self.config.generations_url(&credentials.endpoint);
        let body = Self::build_body(self.model(), request);

        debug!(endpoint = %endpoint, "Calling images/generations");

        let response = with_api_key(self.http.post(&endpoint), &credentials.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::api(&endpoint, 0, format!("Request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api(&endpoint, status.as_u16(), body));
        }

        let api_response: ImagesResponse = response.json().await.map_err(|e| {
            Error::api(&endpoint, status.as_u16(), format!("Failed to parse response: {}", e))
        })?;

        if api_response.data.is_empty() {
            return Err(Error::api(&endpoint, status.as_u16(), "No images returned from API"));
        }

        let mut images = Vec::with_capacity(api_response.data.len());
        for item in api_response.data {
            let (bytes, mime_type) = match (item.b64_json, item.url) {
                (Some(data), _) => {
                    let bytes = BASE64.decode(data.trim()).map_err(|e| {
                        Error::api(&endpoint, status.as_u16(), format!("Invalid base64 image data: {}", e))
                    })?;
                    (bytes, None)
                }
                (None, Some(url)) => self.download(&url).await?,
                (None, None) => {
                    return Err(Error::api(
                        &endpoint,
                        status.as_u16(),
                        "Image entry carried neither b64_json nor url",
                    ));
                }
            };

            let mime_type = mime_type.unwrap_or_else(|| sniff_mime_type(&bytes).to_string());
            images.push(GeneratedImage {
                bytes,
                mime_type,
                revised_prompt: item.revised_prompt,
            });
        }

        info!(count = images.len(), "Received images from API");
        Ok(images)
    }
}

/// Guess an image MIME type from its leading bytes, defaulting to PNG.
pub fn sniff_mime_type(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "image/png",
    }
}

// =============================================================================
// API Request/Response Types
// =============================================================================

/// images/generations request body.
#[derive(Debug, Serialize)]
pub struct ImagesRequest {
    /// Text prompt
    pub prompt: String,
    /// Output size
    pub size: String,
    /// Quality tier as the service names it
    pub quality: String,
    /// Number of images
    pub n: u8,
    /// `b64_json` for families that default to URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,
    /// Encoded image format for families that take one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
}

/// images/generations response body.
#[derive(Debug, Deserialize)]
pub struct ImagesResponse {
    /// Unix timestamp of creation
    #[serde(default)]
    pub created: Option<u64>,
    /// Generated images
    #[serde(default)]
    pub data: Vec<ImageData>,
}

/// One entry of `data` in the response.
#[derive(Debug, Deserialize)]
pub struct ImageData {
    /// Base64-encoded image
    #[serde(default)]
    pub b64_json: Option<String>,
    /// URL of the image, for URL responses
    #[serde(default)]
    pub url: Option<String>,
    /// Rewritten prompt
    #[serde(default)]
    pub revised_prompt: Option<String>,
}
