//! Request signing.

use chrono::Utc;
use serde::Serialize;

use crate::{
    config::Credentials,
    models::{AuthHeaders, SignedRequest},
    utils::hmac::{build_canonical_string, compute_mac},
};

/// Errors raised while signing a request.
///
/// Both are caller-side and fatal; no partial signature is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// The configured signing secret is missing or empty.
    #[error("signing secret is missing or empty")]
    MissingSecret,

    /// The request path is not an absolute request-target.
    #[error("request path must start with '/': {0:?}")]
    InvalidPath(String),

    /// The structured body could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    BodySerialization(#[from] serde_json::Error),
}

/// Signs outgoing requests with the shared secret.
///
/// Pure apart from the defaulted timestamp: the same inputs always yield
/// the same headers and body, so signing may run concurrently from any
/// number of tasks without coordination.
#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Credentials,
}

impl Signer {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Sign a request, defaulting the timestamp to the current time in
    /// milliseconds.
    ///
    /// The returned body bytes are exactly the bytes that were hashed;
    /// transmit them unmodified together with the headers.
    pub fn sign(&self, method: &str, path: &str, body: &[u8]) -> Result<SignedRequest, SignError> {
        self.sign_at(method, path, body, Utc::now().timestamp_millis())
    }

    /// Sign a request with an explicit timestamp.
    pub fn sign_at(
        &self,
        method: &str,
        path: &str,
        body: &[u8],
        timestamp_ms: i64,
    ) -> Result<SignedRequest, SignError> {
        if !self.credentials.has_secret() {
            return Err(SignError::MissingSecret);
        }
        if !path.starts_with('/') {
            return Err(SignError::InvalidPath(path.to_string()));
        }

        let canonical = build_canonical_string(method, path, timestamp_ms, body);
        let signature = compute_mac(self.credentials.secret(), &canonical);

        Ok(SignedRequest {
            method: method.to_uppercase(),
            path: path.to_string(),
            headers: AuthHeaders {
                client_id: self.credentials.client_id.clone(),
                timestamp_ms,
                signature,
            },
            body: body.to_vec(),
        })
    }

    /// Serialize a structured body to JSON and sign those exact bytes.
    pub fn sign_json<T: Serialize>(
        &self,
        method: &str,
        path: &str,
        body: &T,
    ) -> Result<SignedRequest, SignError> {
        let bytes = serde_json::to_vec(body)?;
        self.sign(method, path, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> Signer {
        Signer::new(Credentials::new("e2e-runner", "test-secret"))
    }

    #[test]
    fn signing_is_deterministic() {
        let s = signer();
        let a = s.sign_at("POST", "/agent/chat", b"{}", 1_700_000_000_000).unwrap();
        let b = s.sign_at("POST", "/agent/chat", b"{}", 1_700_000_000_000).unwrap();
        assert_eq!(a.headers.signature, b.headers.signature);
        assert_eq!(a.body, b.body);
    }

    #[test]
    fn signed_body_is_exactly_the_input_bytes() {
        let body = br#"{"messages":[]}"#;
        let signed = signer().sign_at("POST", "/agent/chat", body, 1).unwrap();
        assert_eq!(signed.body, body.to_vec());
    }

    #[test]
    fn known_vector_yields_expected_headers() {
        let body = br#"{"messages":[{"role":"user","content":"ping"}]}"#;
        let signed = signer()
            .sign_at("post", "/agent/chat", body, 1_700_000_000_000)
            .unwrap();
        assert_eq!(signed.method, "POST");
        assert_eq!(signed.headers.client_id, "e2e-runner");
        assert_eq!(signed.headers.timestamp_ms, 1_700_000_000_000);
        assert_eq!(
            signed.headers.signature,
            "a7b5bc3a00e307bf53d707296c4adf251418f40e84de3057e26fc52b0baac829"
        );
    }

    #[test]
    fn empty_secret_is_a_configuration_error() {
        let s = Signer::new(Credentials::new("e2e-runner", ""));
        assert!(matches!(
            s.sign("POST", "/agent/chat", b""),
            Err(SignError::MissingSecret)
        ));
    }

    #[test]
    fn relative_path_is_rejected() {
        assert!(matches!(
            signer().sign("POST", "agent/chat", b""),
            Err(SignError::InvalidPath(_))
        ));
    }
}
