//! Azure Blob Storage utilities.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::auth::{Secret, headers, with_sas};
use crate::config::StorageConfig;
use crate::error::{StorageError, StorageOperation};

/// Blob path components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobPath {
    /// Container name
    pub container: String,
    /// Blob name within the container (may contain `/`)
    pub name: String,
}

impl std::fmt::Display for BlobPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.container, self.name)
    }
}

/// Destination for generated image bytes.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` at `path` and return the blob's public URL.
    async fn upload(&self, path: &BlobPath, data: &[u8], content_type: &str) -> Result<String, StorageError>;
}

/// Blob service REST client.
#[derive(Clone)]
pub struct BlobClient {
    client: reqwest::Client,
    base_url: String,
    sas_token: Option<Secret>,
}

impl BlobClient {
    /// Create a client for the configured storage account.
    pub fn new(storage: &StorageConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: storage.blob_service_uri.trim_end_matches('/').to_string(),
            sas_token: storage.sas_token.clone(),
        }
    }

    /// Public URL of a blob, without any SAS token.
    ///
    /// Each path segment is percent-encoded; the separating slashes are kept.
    pub fn url_for(&self, path: &BlobPath) -> String {
        let name = path
            .name
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{}/{}", self.base_url, urlencoding::encode(&path.container), name)
    }
}

#[async_trait]
impl BlobStore for BlobClient {
    #[instrument(level = "debug", skip(self, path, data), fields(path = %path, bytes = data.len()))]
    async fn upload(&self, path: &BlobPath, data: &[u8], content_type: &str) -> Result<String, StorageError> {
        let public_url = self.url_for(path);
        let url = with_sas(&public_url, self.sas_token.as_ref());

        // The request URL carries the SAS token, so it is dropped from transport errors.
        let response = self
            .client
            .put(&url)
            .header(headers::BLOB_TYPE, headers::BLOCK_BLOB)
            .header(headers::MS_VERSION, headers::STORAGE_API_VERSION)
            .header("Content-Type", content_type)
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| {
                StorageError::operation_failed(
                    path.to_string(),
                    StorageOperation::Upload,
                    format!("Upload request failed: {}", e.without_url()),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::operation_failed(
                path.to_string(),
                StorageOperation::Upload,
                format!("Failed with status {}: {}", status, body),
            ));
        }

        debug!(url = %public_url, "Blob uploaded");
        Ok(public_url)
    }
}
