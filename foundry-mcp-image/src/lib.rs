//! Foundry MCP Image Server Library
//!
//! This library provides text-to-image generation over MCP, backed by an
//! Azure AI Foundry image deployment (FLUX by default).

pub mod client;
pub mod handler;
pub mod resources;
pub mod response;
pub mod schema;
pub mod server;

pub use client::{FoundryImageClient, GeneratedImage, GenerationRequest, ImageGenerator};
pub use handler::{ImageGenerateParams, ImageGenerateResult, ImageHandler};
pub use server::{GenerateImageToolParams, ImageServer};
