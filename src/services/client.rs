//! Signed HTTP transport.
//!
//! A thin wrapper over `reqwest` that signs every request and attaches the
//! authentication headers. Resilience concerns (retries, timeouts) belong
//! to the caller's reqwest configuration, not this layer.

use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::{
    config::Credentials,
    services::signer::{SignError, Signer},
};

/// Errors raised by the signed client.
#[derive(Debug, thiserror::Error)]
pub enum SignedClientError {
    #[error("signing failed: {0}")]
    Sign(#[from] SignError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// An HTTP client that signs requests before transmitting them.
///
/// The headers and body handed to the transport are exactly the ones the
/// signer produced, so the server-side verifier accepts them unmodified.
#[derive(Debug, Clone)]
pub struct SignedClient {
    http: Client,
    signer: Signer,
    base_url: String,
    /// Extra headers attached to every request, outside the authentication
    /// contract (e.g. `x-test-mode: stub`).
    extra_headers: Vec<(String, String)>,
}

impl SignedClient {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            http: Client::new(),
            signer: Signer::new(credentials),
            base_url: base_url.into(),
            extra_headers: Vec::new(),
        }
    }

    /// Attach a pass-through header to every subsequent request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// POST a JSON body to `path`, signed over the exact serialized bytes.
    pub async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, SignedClientError> {
        let signed = self.signer.sign_json("POST", path, body)?;
        debug!(%path, client_id = %signed.headers.client_id, "sending signed request");

        let mut request = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .header("content-type", "application/json")
            .body(signed.body);

        for (name, value) in signed.headers.to_header_pairs() {
            request = request.header(name, value);
        }
        for (name, value) in &self.extra_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        Ok(request.send().await?)
    }

    /// GET `path` with an empty signed body.
    pub async fn get(&self, path: &str) -> Result<reqwest::Response, SignedClientError> {
        let signed = self.signer.sign("GET", path, b"")?;
        debug!(%path, client_id = %signed.headers.client_id, "sending signed request");

        let mut request = self.http.get(format!("{}{}", self.base_url, path));
        for (name, value) in signed.headers.to_header_pairs() {
            request = request.header(name, value);
        }
        for (name, value) in &self.extra_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        Ok(request.send().await?)
    }
}
