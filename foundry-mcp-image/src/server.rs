//! MCP Server implementation for the Image server.
//!
//! This module provides the MCP server handler that exposes:
//! - `generate_image` tool for text-to-image generation
//! - `health_check` tool reporting service status
//! - `image://options` resource describing the accepted options

use crate::handler::{ImageGenerateParams, ImageHandler};
use crate::{resources, response, schema};
use foundry_mcp_common::config::Config;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    model::{
        CallToolResult, ListResourcesResult, ListToolsResult, ReadResourceResult, ResourceContents,
        ServerCapabilities, ServerInfo, Tool,
    },
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info};

/// Name of the image generation tool.
pub const GENERATE_IMAGE_TOOL: &str = "generate_image";

/// Name of the health check tool.
pub const HEALTH_CHECK_TOOL: &str = "health_check";

/// MCP Server for image generation.
#[derive(Clone)]
pub struct ImageServer {
    handler: Arc<ImageHandler>,
}

/// Tool parameters wrapper for generate_image.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GenerateImageToolParams {
    /// The text description of the image to generate
    pub prompt: String,
    /// The size of the generated image (e.g., '1024x1024')
    #[serde(default)]
    pub size: Option<String>,
    /// The quality of the generated image (default: standard)
    #[serde(default)]
    pub quality: Option<String>,
    /// The number of images to generate (default: 1)
    #[serde(default)]
    pub n: Option<u8>,
    /// Video ID for associating generated images with a video (default: test)
    #[serde(default)]
    pub video_id: Option<String>,
    /// Scene number for associating generated images with a specific scene in a video
    #[serde(default)]
    pub scene_number: Option<u32>,
    /// Talk number for associating generated images with a specific talk in a video
    #[serde(default)]
    pub talk_number: Option<u32>,
    /// Prefix for the generated image filenames (default: img)
    #[serde(default)]
    pub prefix: Option<String>,
}

impl From<GenerateImageToolParams> for ImageGenerateParams {
    fn from(params: GenerateImageToolParams) -> Self {
        let defaults = ImageGenerateParams::new(params.prompt);
        Self {
            size: params.size.unwrap_or(defaults.size),
            quality: params.quality.unwrap_or(defaults.quality),
            n: params.n.unwrap_or(defaults.n),
            video_id: params.video_id.unwrap_or(defaults.video_id),
            scene_number: params.scene_number.unwrap_or(defaults.scene_number),
            talk_number: params.talk_number.unwrap_or(defaults.talk_number),
            prefix: params.prefix.unwrap_or(defaults.prefix),
            prompt: defaults.prompt,
        }
    }
}

impl ImageServer {
    /// Create a new ImageServer with the given configuration.
    pub fn new(config: Config) -> Self {
        Self::with_handler(ImageHandler::new(config))
    }

    /// Create a server around an existing handler.
    pub fn with_handler(handler: ImageHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    fn config(&self) -> &Config {
        self.handler.config()
    }

    /// Generate images from untyped tool arguments.
    ///
    /// Every outcome, including invalid input, is a JSON payload.
    pub async fn generate_image(&self, arguments: Option<serde_json::Map<String, serde_json::Value>>) -> CallToolResult {
        info!(deployment = %self.config().deployment_name, "MCP Image Generator received a request");
        let outcome = self.handler.generate_image(arguments).await;
        if outcome.is_ok() {
            info!("Image generation completed successfully");
        }
        response::to_call_tool_result(outcome)
    }

    /// Report service health.
    pub fn health_check(&self) -> CallToolResult {
        debug!("Health check");
        response::health_result()
    }

    /// Tools published by this server.
    pub fn tools() -> Vec<Tool> {
        vec![
            Tool {
                name: Cow::Borrowed(GENERATE_IMAGE_TOOL),
                description: Some(Cow::Borrowed(
                    "Generate images using Flux Pro 2 model via Azure AI Foundry. \
                     Provide a text prompt describing the image you want to create.",
                )),
                input_schema: schema::input_schema::<GenerateImageToolParams>(),
                annotations: None,
                icons: None,
                meta: None,
                output_schema: None,
                title: None,
            },
            Tool {
                name: Cow::Borrowed(HEALTH_CHECK_TOOL),
                description: Some(Cow::Borrowed(
                    "Check the health status of the MCP Image Generator service.",
                )),
                input_schema: schema::empty_input_schema(),
                annotations: None,
                icons: None,
                meta: None,
                output_schema: None,
                title: None,
            },
        ]
    }
}

impl ServerHandler for ImageServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Image generation server using Azure AI Foundry image deployments. \
                 Use generate_image to create images from text prompts; generated images \
                 are stored per video, scene and talk. Read image://options for accepted values."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _params: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        async move {
            Ok(ListToolsResult {
                tools: Self::tools(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        params: rmcp::model::CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            match params.name.as_ref() {
                GENERATE_IMAGE_TOOL => Ok(self.generate_image(params.arguments).await),
                HEALTH_CHECK_TOOL => Ok(self.health_check()),
                _ => Err(McpError::invalid_params(format!("Unknown tool: {}", params.name), None)),
            }
        }
    }

    fn list_resources(
        &self,
        _params: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        async move {
            debug!("Listing resources");

            let options_resource = rmcp::model::Resource {
                raw: rmcp::model::RawResource {
                    uri: resources::OPTIONS_URI.to_string(),
                    name: "Image Generation Options".to_string(),
                    title: None,
                    description: Some(
                        "Model families with their sizes, qualities and image limits".to_string(),
                    ),
                    mime_type: Some("application/json".to_string()),
                    size: None,
                    icons: None,
                    meta: None,
                },
                annotations: None,
            };

            Ok(ListResourcesResult {
                resources: vec![options_resource],
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn read_resource(
        &self,
        params: rmcp::model::ReadResourceRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        async move {
            let uri = &params.uri;
            debug!(uri = %uri, "Reading resource");

            let content = match uri.as_str() {
                resources::OPTIONS_URI => resources::options_resource_json(self.config()),
                _ => {
                    return Err(McpError::resource_not_found(
                        format!("Unknown resource: {}", uri),
                        None,
                    ));
                }
            };

            Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(content, uri.clone())],
            })
        }
    }
}
