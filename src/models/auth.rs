//! Authentication-related data models.

use actix_web::http::header::HeaderMap;
use serde::{Deserialize, Serialize};

/// Header carrying the caller's client id.
pub const CLIENT_ID_HEADER: &str = "x-client-id";
/// Header carrying the signing timestamp, decimal milliseconds since epoch.
pub const TIMESTAMP_HEADER: &str = "x-timestamp";
/// Header carrying the lowercase hex HMAC-SHA256 digest.
pub const SIGNATURE_HEADER: &str = "x-signature";

/// The strongly typed authentication header record attached to every
/// signed request.
///
/// Transport-specific extras (e.g. `x-test-mode`) ride alongside these on
/// the wire but are not part of the authentication contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthHeaders {
    pub client_id: String,
    pub timestamp_ms: i64,
    pub signature: String,
}

impl AuthHeaders {
    /// Render as `(name, value)` pairs ready to attach to an outgoing
    /// HTTP request.
    pub fn to_header_pairs(&self) -> [(&'static str, String); 3] {
        [
            (CLIENT_ID_HEADER, self.client_id.clone()),
            (TIMESTAMP_HEADER, self.timestamp_ms.to_string()),
            (SIGNATURE_HEADER, self.signature.clone()),
        ]
    }

    /// Extract the auth record from an incoming header map.
    ///
    /// Returns `None` if any of the three headers is absent, non-UTF-8, or
    /// the timestamp is not a decimal integer.
    pub fn from_header_map(headers: &HeaderMap) -> Option<Self> {
        let get = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        let client_id = get(CLIENT_ID_HEADER)?.to_string();
        let timestamp_ms: i64 = get(TIMESTAMP_HEADER)?.parse().ok()?;
        let signature = get(SIGNATURE_HEADER)?.to_string();

        Some(Self {
            client_id,
            timestamp_ms,
            signature,
        })
    }
}

/// The artifact produced by signing: the exact body bytes that were hashed
/// plus the headers that authenticate them.
///
/// A caller that transmits `headers` and `body` unmodified produces a
/// request the verifier will accept, absent skew or tampering.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: String,
    pub path: String,
    pub headers: AuthHeaders,
    pub body: Vec<u8>,
}

/// Why a request was rejected by the verifier.
///
/// Every rejection is terminal for the request; only `StaleTimestamp` is
/// worth retrying, and only after the caller re-signs with a fresh clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// Required auth headers missing or unparseable.
    #[error("missing or malformed authentication headers")]
    MalformedRequest,

    /// Client id not present in the credential store.
    #[error("unknown client")]
    UnknownClient,

    /// Timestamp outside the skew window.
    #[error("timestamp outside the accepted clock-skew window")]
    StaleTimestamp,

    /// MAC mismatch: tampering or a shared-secret mismatch.
    #[error("signature mismatch")]
    BadSignature,
}

/// Outcome of a single verification pass.
pub type VerifyResult = Result<(), Rejection>;
