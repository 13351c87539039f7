//! Credential handling for the image service and blob storage.
//!
//! Azure OpenAI deployments authenticate with a static key sent in the
//! `api-key` header; blob uploads authenticate with a SAS token appended to
//! the object URL. Both are wrapped in [`Secret`] so they never show up in
//! `Debug` output or log lines.

use std::fmt;

/// A credential string that is redacted when formatted.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a credential value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the raw credential, for building request headers or URLs only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Attach the image-service API key to a request.
pub fn with_api_key(request: reqwest::RequestBuilder, key: &Secret) -> reqwest::RequestBuilder {
    request.header(headers::API_KEY, key.expose())
}

/// Append a SAS token to a blob URL.
///
/// Tokens are accepted with or without their leading `?`, as the storage
/// portal hands them out both ways.
pub fn with_sas(url: &str, sas: Option<&Secret>) -> String {
    match sas.map(|s| s.expose().trim_start_matches('?')) {
        Some(token) if !token.is_empty() => {
            let separator = if url.contains('?') { '&' } else { '?' };
            format!("{url}{separator}{token}")
        }
        _ => url.to_string(),
    }
}

/// A URL with its query string removed, for error messages and logs.
///
/// SAS tokens and signed download links carry their credentials in the query.
pub fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

/// Header names and fixed header values used by the Azure services.
pub mod headers {
    /// Header carrying the Azure OpenAI API key.
    pub const API_KEY: &str = "api-key";

    /// Blob type header required on Put Blob.
    pub const BLOB_TYPE: &str = "x-ms-blob-type";

    /// Storage REST API version header.
    pub const MS_VERSION: &str = "x-ms-version";

    /// Blob type for whole-object uploads.
    pub const BLOCK_BLOB: &str = "BlockBlob";

    /// Storage REST API version sent with every blob request.
    pub const STORAGE_API_VERSION: &str = "2023-11-03";
}
