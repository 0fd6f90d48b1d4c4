//! Server-side request verification.
//!
//! Stateless single-pass validation. The check order is fixed so that a
//! request failing on several counts always reports the same rejection:
//! header extraction, client lookup, freshness, then the MAC itself.

use actix_web::http::header::HeaderMap;
use chrono::Utc;

use crate::{
    config::{CredentialStore, VerifyConfig},
    models::{AuthHeaders, Rejection, VerifyResult},
    services::skew::is_fresh,
    utils::hmac::{build_canonical_string, mac_matches},
};

/// Verifies signed requests against a credential store.
///
/// Holds only immutable state, so a single instance may be shared across
/// worker threads freely.
#[derive(Debug, Clone)]
pub struct Verifier {
    store: CredentialStore,
    config: VerifyConfig,
}

impl Verifier {
    pub fn new(store: CredentialStore, config: VerifyConfig) -> Self {
        Self { store, config }
    }

    /// Verify a request using the current time as the freshness reference.
    pub fn verify(&self, method: &str, path: &str, headers: &HeaderMap, body: &[u8]) -> VerifyResult {
        self.verify_at(method, path, headers, body, Utc::now().timestamp_millis())
    }

    /// Verify a request against an explicit `now_ms`, for deterministic tests.
    ///
    /// Method, path, timestamp and body are taken as received; any mutation
    /// after signing makes the recomputed MAC differ and the request is
    /// rejected with `BadSignature`.
    pub fn verify_at(
        &self,
        method: &str,
        path: &str,
        headers: &HeaderMap,
        body: &[u8],
        now_ms: i64,
    ) -> VerifyResult {
        let auth = AuthHeaders::from_header_map(headers).ok_or(Rejection::MalformedRequest)?;

        let secret = self
            .store
            .lookup(&auth.client_id)
            .ok_or(Rejection::UnknownClient)?;

        if !is_fresh(auth.timestamp_ms, now_ms, self.config.skew_window_ms) {
            return Err(Rejection::StaleTimestamp);
        }

        let canonical = build_canonical_string(method, path, auth.timestamp_ms, body);
        if !mac_matches(secret, &canonical, &auth.signature) {
            return Err(Rejection::BadSignature);
        }

        Ok(())
    }
}
