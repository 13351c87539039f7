//! Configuration module for loading environment variables and settings.
//!
//! Credentials for the image service are deliberately optional here: the
//! server must start and answer `tools/list` without them, and a tool call
//! made while they are absent is reported back to the caller instead of
//! failing the process.

use crate::auth::Secret;
use crate::error::ConfigError;
use crate::models::{DEFAULT_MODEL_FAMILY, ImageModel, ModelRegistry};

/// Environment variable holding the Azure OpenAI resource endpoint.
pub const ENDPOINT_VAR: &str = "AZURE_OPENAI_ENDPOINT";
/// Environment variable holding the Azure OpenAI API key.
pub const API_KEY_VAR: &str = "AZURE_OPENAI_API_KEY";
/// Environment variable selecting the deployment.
pub const DEPLOYMENT_VAR: &str = "AZURE_OPENAI_DEPLOYMENT_NAME";
/// Environment variable overriding the REST API version.
pub const API_VERSION_VAR: &str = "AZURE_OPENAI_API_VERSION";
/// Environment variable selecting the model family behind the deployment.
pub const MODEL_FAMILY_VAR: &str = "IMAGE_MODEL_FAMILY";
/// Environment variable bounding each outbound HTTP request.
pub const TIMEOUT_VAR: &str = "IMAGE_REQUEST_TIMEOUT_SECS";
/// Environment variable holding the blob service base URL.
pub const BLOB_SERVICE_URI_VAR: &str = "AgentVideoStorage__blobServiceUri";
/// Environment variable holding the blob SAS token.
pub const BLOB_SAS_TOKEN_VAR: &str = "AgentVideoStorage__sasToken";

/// Deployment used when none is configured.
pub const DEFAULT_DEPLOYMENT_NAME: &str = "flux-pro-2";
/// Images API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2025-04-01-preview";
/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Azure OpenAI resource endpoint, e.g. `https://my-res.openai.azure.com`
    pub endpoint: Option<String>,
    /// Azure OpenAI API key
    pub api_key: Option<Secret>,
    /// Deployment serving image generation
    pub deployment_name: String,
    /// Images API version query parameter
    pub api_version: String,
    /// Model family behind the deployment
    pub model: &'static ImageModel,
    /// Timeout applied to each outbound HTTP request
    pub request_timeout_secs: u64,
    /// Blob storage for generated images
    pub storage: Option<StorageConfig>,
}

/// Blob storage settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Blob service base URL, e.g. `https://acct.blob.core.windows.net`
    pub blob_service_uri: String,
    /// SAS token granting write access, if the account is not public-write
    pub sas_token: Option<Secret>,
}

/// Endpoint and key needed for a generation call.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Resource endpoint without a trailing slash
    pub endpoint: String,
    /// API key
    pub api_key: Secret,
}

impl Config {
    /// Load configuration from environment variables and .env file.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if a variable is set but cannot be
    /// parsed. Missing credentials are not an error at this point.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let endpoint = var(ENDPOINT_VAR).map(|e| e.trim_end_matches('/').to_string());
        let api_key = var(API_KEY_VAR).map(Secret::from);

        let deployment_name =
            var(DEPLOYMENT_VAR).unwrap_or_else(|| DEFAULT_DEPLOYMENT_NAME.to_string());
        let api_version = var(API_VERSION_VAR).unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        let model = match var(MODEL_FAMILY_VAR) {
            Some(name) => ModelRegistry::resolve(&name).ok_or_else(|| {
                ConfigError::invalid_value(
                    MODEL_FAMILY_VAR,
                    format!(
                        "unknown model family '{}'. Valid options: {}",
                        name,
                        ModelRegistry::list()
                            .iter()
                            .map(|m| m.id)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                )
            })?,
            None => DEFAULT_MODEL_FAMILY,
        };

        let request_timeout_secs = match var(TIMEOUT_VAR) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::invalid_value(TIMEOUT_VAR, format!("expected a positive integer, got '{raw}'")))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let storage = var(BLOB_SERVICE_URI_VAR).map(|uri| StorageConfig {
            blob_service_uri: uri.trim_end_matches('/').to_string(),
            sas_token: var(BLOB_SAS_TOKEN_VAR).map(Secret::from),
        });

        Ok(Self {
            endpoint,
            api_key,
            deployment_name,
            api_version,
            model,
            request_timeout_secs,
            storage,
        })
    }

    /// Return the image service credentials, or report which are missing.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingCredentials` naming every absent variable.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        match (&self.endpoint, &self.api_key) {
            (Some(endpoint), Some(api_key)) => Ok(Credentials {
                endpoint: endpoint.clone(),
                api_key: api_key.clone(),
            }),
            (endpoint, api_key) => {
                let mut missing = Vec::new();
                if endpoint.is_none() {
                    missing.push(ENDPOINT_VAR.to_string());
                }
                if api_key.is_none() {
                    missing.push(API_KEY_VAR.to_string());
                }
                Err(ConfigError::MissingCredentials(missing))
            }
        }
    }

    /// Get the images/generations URL for the configured deployment.
    pub fn generations_url(&self, endpoint: &str) -> String {
        format!(
            "{}/openai/deployments/{}/images/generations?api-version={}",
            endpoint.trim_end_matches('/'),
            self.deployment_name,
            self.api_version
        )
    }
}
