//! Server startup integration tests.
//!
//! The image server must start without credentials and still publish its
//! tools and resources.

use foundry_mcp_common::Config;
use rmcp::ServerHandler;

/// Configuration with nothing set in the environment.
fn test_config() -> Config {
    Config::from_lookup(|_| None).expect("defaults are valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundry_mcp_common::{Transport, TransportArgs};
    use foundry_mcp_image::ImageServer;

    #[test]
    fn test_image_server_startup() {
        let server = ImageServer::new(test_config());
        let info = server.get_info();

        assert!(info.instructions.is_some());
        let instructions = info.instructions.as_ref().unwrap().to_lowercase();
        assert!(instructions.contains("image"), "Server instructions should mention 'image'");
    }

    #[test]
    fn test_server_has_tools_and_resources_capability() {
        let info = ImageServer::new(test_config()).get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
    }

    #[test]
    fn test_default_config() {
        let config = test_config();
        assert_eq!(config.deployment_name, "flux-pro-2");
        assert_eq!(config.model.id, "flux");
        assert!(config.credentials().is_err());
        assert!(config.storage.is_none());
    }

    #[test]
    fn test_default_transport_is_stdio() {
        let transport = TransportArgs::default().into_transport();
        assert_eq!(transport, Transport::Stdio);
    }
}
