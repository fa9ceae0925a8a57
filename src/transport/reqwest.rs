//! `reqwest`-backed transport (requires the `reqwest` feature).

use url::Url;

use crate::error::{PrimeCacheError, Result};
use crate::transport::{Transport, TransportResponse};

/// Transport that performs requests with a [`reqwest::Client`].
///
/// The client is cheap to clone and pools connections internally, so one
/// transport can be shared by every render.
///
/// # Example
///
/// ```rust,no_run
/// use cache_primer::ReqwestTransport;
///
/// let transport = ReqwestTransport::new();
/// let custom = ReqwestTransport::with_client(reqwest::Client::new());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default [`reqwest::Client`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport from an existing client, keeping its timeouts,
    /// redirect policy and default headers.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| PrimeCacheError::Transport(Box::new(e)))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Buffered as bytes; TransportResponse::text applies the charset
        let body = response
            .bytes()
            .await
            .map_err(|e| PrimeCacheError::Transport(Box::new(e)))?
            .to_vec();

        tracing::debug!("GET {url} -> {status} ({} bytes)", body.len());
        Ok(TransportResponse {
            status,
            content_type,
            body,
        })
    }
}
