//! Foundry MCP Image Server
//!
//! MCP server for image generation using Azure AI Foundry image deployments.

use anyhow::Result;
use clap::Parser;
use foundry_mcp_common::tracing::init_tracing;
use foundry_mcp_common::{Config, McpServerBuilder, TransportArgs};
use foundry_mcp_image::schema::tool_properties_json;
use foundry_mcp_image::{GenerateImageToolParams, ImageServer};

/// Command-line arguments for the image server.
#[derive(Parser, Debug)]
#[command(name = "foundry-mcp-image")]
#[command(about = "MCP server for image generation using Azure AI Foundry")]
#[command(version)]
struct Args {
    /// Transport configuration
    #[command(flatten)]
    transport: TransportArgs,

    /// Print the generate_image tool properties as JSON and exit
    #[arg(long)]
    print_tool_properties: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_tool_properties {
        println!("{}", tool_properties_json::<GenerateImageToolParams>());
        return Ok(());
    }

    init_tracing();
    tracing::info!("foundry-mcp-image server starting...");

    let config = Config::from_env()?;
    tracing::info!(
        deployment = %config.deployment_name,
        model = config.model.id,
        credentials_configured = config.credentials().is_ok(),
        storage_configured = config.storage.is_some(),
        "Configuration loaded"
    );

    let server = ImageServer::new(config);
    let transport = args.transport.into_transport();

    McpServerBuilder::new(server)
        .with_transport(transport)
        .run()
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
