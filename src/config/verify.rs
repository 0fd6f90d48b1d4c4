//! Verifier configuration.

use std::env;

use crate::services::skew::DEFAULT_SKEW_WINDOW_MS;

/// Configuration for request verification.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Maximum tolerated clock skew between signer and verifier, in
    /// milliseconds. Symmetric: applies to timestamps both behind and
    /// ahead of the verifier's clock.
    pub skew_window_ms: i64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            skew_window_ms: DEFAULT_SKEW_WINDOW_MS,
        }
    }
}

impl VerifyConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let skew_window_ms = env::var("AGENT_HMAC_SKEW_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SKEW_WINDOW_MS);

        Self { skew_window_ms }
    }
}
