//! Image generation handler for the MCP Image server.
//!
//! This module provides the `ImageHandler` pipeline and parameter types for
//! text-to-image generation against an Azure AI Foundry deployment:
//! parse, validate, read credentials, call the generator once, then persist
//! or inline the results.

use crate::client::{FoundryImageClient, GeneratedImage, GenerationRequest, ImageGenerator};
use crate::server::GenerateImageToolParams;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use foundry_mcp_common::blob::{BlobClient, BlobPath, BlobStore};
use foundry_mcp_common::config::Config;
use foundry_mcp_common::error::Error;
use foundry_mcp_common::models::ImageModel;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

/// Default output size.
pub const DEFAULT_SIZE: &str = "1024x1024";

/// Default quality tier.
pub const DEFAULT_QUALITY: &str = "standard";

/// Default number of images.
pub const DEFAULT_N: u8 = 1;

/// Default video identifier used in output paths.
pub const DEFAULT_VIDEO_ID: &str = "test";

/// Default output filename prefix.
pub const DEFAULT_PREFIX: &str = "img";

/// Blob container generated images are written to.
pub const OUTPUT_CONTAINER: &str = "fluxjob";

/// Directory inside the container that holds per-video folders.
pub const OUTPUT_ROOT: &str = "agentvideo";

/// Message returned when the prompt is absent or blank.
pub const MISSING_PROMPT: &str = "Missing required parameter: prompt";

/// Text-to-image generation parameters.
///
/// Tool arguments are parsed through [`GenerateImageToolParams`]; this is the
/// fully-defaulted form the pipeline works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageGenerateParams {
    /// Text prompt describing the image to generate.
    pub prompt: String,

    /// Output size as `<width>x<height>`.
    pub size: String,

    /// Quality tier forwarded to the service.
    pub quality: String,

    /// Number of images to generate.
    pub n: u8,

    /// Video the image belongs to.
    pub video_id: String,

    /// Scene within the video.
    pub scene_number: u32,

    /// Talk within the scene.
    pub talk_number: u32,

    /// Output filename prefix.
    pub prefix: String,
}

/// Validation error details for image generation parameters.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ImageGenerateParams {
    /// Create parameters for `prompt` with every other field at its default.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            size: DEFAULT_SIZE.to_string(),
            quality: DEFAULT_QUALITY.to_string(),
            n: DEFAULT_N,
            video_id: DEFAULT_VIDEO_ID.to_string(),
            scene_number: 0,
            talk_number: 0,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Build parameters from untyped tool arguments.
    ///
    /// # Errors
    /// Returns `Error::Validation` if the prompt is missing or a field has
    /// the wrong type.
    pub fn from_arguments(arguments: Option<Map<String, Value>>) -> Result<Self, Error> {
        let arguments = arguments.unwrap_or_default();

        match arguments.get("prompt") {
            None | Some(Value::Null) => return Err(Error::validation(MISSING_PROMPT)),
            Some(Value::String(prompt)) if prompt.trim().is_empty() => {
                return Err(Error::validation(MISSING_PROMPT));
            }
            Some(_) => {}
        }

        let tool_params: GenerateImageToolParams = serde_json::from_value(Value::Object(arguments))
            .map_err(|e| Error::validation(format!("Invalid parameters: {}", e)))?;

        Ok(tool_params.into())
    }

    /// Validate the parameters against the model family constraints.
    ///
    /// # Returns
    /// - `Ok(())` if all parameters are valid
    /// - `Err(Vec<ValidationError>)` with all validation errors
    pub fn validate(&self, model: &ImageModel) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.prompt.trim().is_empty() {
            errors.push(ValidationError {
                field: "prompt".to_string(),
                message: MISSING_PROMPT.to_string(),
            });
        }

        if !model.supports_size(&self.size) {
            errors.push(ValidationError {
                field: "size".to_string(),
                message: format!(
                    "Invalid size '{}'. Valid options for {}: {}",
                    self.size,
                    model.id,
                    model.supported_sizes.join(", ")
                ),
            });
        }

        if !model.supports_quality(&self.quality) {
            errors.push(ValidationError {
                field: "quality".to_string(),
                message: format!(
                    "Invalid quality '{}'. Valid options for {}: {}",
                    self.quality,
                    model.id,
                    model.supported_qualities.join(", ")
                ),
            });
        }

        if self.n < 1 || self.n > model.max_images {
            errors.push(ValidationError {
                field: "n".to_string(),
                message: format!("n must be between 1 and {} for {}, got {}", model.max_images, model.id, self.n),
            });
        }

        for (field, value) in [("video_id", &self.video_id), ("prefix", &self.prefix)] {
            if let Some(message) = path_segment_problem(value) {
                errors.push(ValidationError {
                    field: field.to_string(),
                    message,
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The request sent to the image service.
    pub fn to_generation_request(&self) -> GenerationRequest {
        GenerationRequest {
            prompt: self.prompt.clone(),
            size: self.size.clone(),
            quality: self.quality.clone(),
            n: self.n,
        }
    }

    /// Blob path for the image at `index`.
    ///
    /// Names always end in `.png` whatever format the service returned. The
    /// first image uses the bare template; later images get `-{index}` before
    /// the extension.
    pub fn output_path(&self, index: usize) -> BlobPath {
        let suffix = if index == 0 { String::new() } else { format!("-{}", index) };
        BlobPath {
            container: OUTPUT_CONTAINER.to_string(),
            name: format!(
                "{}/{}/{}-{}-scene{}-talk{}{}.png",
                OUTPUT_ROOT,
                self.video_id,
                self.prefix,
                self.video_id,
                self.scene_number,
                self.talk_number,
                suffix,
            ),
        }
    }
}

/// Describe why `value` cannot be used as a single path segment.
fn path_segment_problem(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some("must not be empty".to_string())
    } else if value.contains('/') || value.contains('\\') || value.contains("..") {
        Some(format!("'{}' must not contain '/', '\\' or '..'", value))
    } else {
        None
    }
}

/// Successful outcome of a generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageGenerateResult {
    /// URL of the first image
    pub image: String,
    /// URLs of every image, in generation order
    pub images: Vec<String>,
    /// Prompt as rewritten by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

/// Generator and storage shared by every invocation.
struct Backends {
    generator: Arc<dyn ImageGenerator>,
    store: Option<Arc<dyn BlobStore>>,
}

impl Backends {
    fn connect(config: &Config) -> Result<Self, Error> {
        debug!("Building image and storage clients");

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::client(e.to_string()))?;

        let store = config
            .storage
            .as_ref()
            .map(|storage| Arc::new(BlobClient::new(storage, http.clone())) as Arc<dyn BlobStore>);

        Ok(Self {
            generator: Arc::new(FoundryImageClient::new(config.clone(), http)),
            store,
        })
    }
}

/// Image generation handler.
///
/// Clients are built on first use, so a server with no credentials still
/// starts and answers every call with an error payload.
pub struct ImageHandler {
    /// Application configuration.
    config: Config,
    backends: OnceCell<Backends>,
}

impl ImageHandler {
    /// Create a new ImageHandler with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            backends: OnceCell::new(),
        }
    }

    /// Create a new ImageHandler with provided dependencies.
    pub fn with_deps(
        config: Config,
        generator: Arc<dyn ImageGenerator>,
        store: Option<Arc<dyn BlobStore>>,
    ) -> Self {
        Self {
            config,
            backends: OnceCell::new_with(Some(Backends { generator, store })),
        }
    }

    /// The configuration this handler serves.
    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn backends(&self) -> Result<&Backends, Error> {
        self.backends
            .get_or_try_init(|| async { Backends::connect(&self.config) })
            .await
    }

    /// Run the generate_image pipeline on untyped tool arguments.
    #[instrument(level = "info", name = "generate_image", skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
    pub async fn generate_image(&self, arguments: Option<Map<String, Value>>) -> Result<ImageGenerateResult, Error> {
        let params = ImageGenerateParams::from_arguments(arguments)?;
        self.generate(params).await
    }

    /// Generate images for parsed parameters.
    ///
    /// # Returns
    /// * `Ok(ImageGenerateResult)` - URLs of the generated images
    /// * `Err(Error)` - If validation fails, credentials are missing, or the
    ///   service or storage call fails
    pub async fn generate(&self, params: ImageGenerateParams) -> Result<ImageGenerateResult, Error> {
        let model = self.config.model;
        params.validate(model).map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            Error::validation(messages.join("; "))
        })?;

        let credentials = self.config.credentials()?;
        let backends = self.backends().await?;

        info!(
            model = model.id,
            deployment = %self.config.deployment_name,
            size = %params.size,
            quality = %params.quality,
            n = params.n,
            "Generating image"
        );

        let images = backends
            .generator
            .generate(&credentials, &params.to_generation_request())
            .await?;

        let revised_prompt = images.iter().find_map(|image| image.revised_prompt.clone());
        let urls = match &backends.store {
            Some(store) => Self::upload_to_storage(store.as_ref(), &images, &params).await?,
            None => images.iter().map(data_uri).collect(),
        };

        let image = urls.first().cloned().ok_or_else(|| {
            Error::api(self.config.generations_url(&credentials.endpoint), 200, "No images returned from API")
        })?;

        Ok(ImageGenerateResult {
            image,
            images: urls,
            revised_prompt,
        })
    }

    /// Upload images to blob storage.
    async fn upload_to_storage(
        store: &dyn BlobStore,
        images: &[GeneratedImage],
        params: &ImageGenerateParams,
    ) -> Result<Vec<String>, Error> {
        let mut urls = Vec::with_capacity(images.len());

        for (i, image) in images.iter().enumerate() {
            let path = params.output_path(i);
            let url = store.upload(&path, &image.bytes, &image.mime_type).await?;
            urls.push(url);
        }

        info!(count = urls.len(), "Uploaded images to storage");
        Ok(urls)
    }
}

/// Inline an image as a `data:` URI.
fn data_uri(image: &GeneratedImage) -> String {
    format!("data:{};base64,{}", image.mime_type, BASE64.encode(&image.bytes))
}
