//! LedgerMind Auth - HMAC request authentication for `/agent/*` traffic
//!
//! This crate implements both sides of the request-signing protocol used to
//! authenticate end-to-end test traffic against the LedgerMind agent APIs:
//! - Canonical request construction (method, path, timestamp, body hash)
//! - HMAC-SHA256 signing with `X-Client-Id` / `X-Timestamp` / `X-Signature`
//!   headers
//! - A ±5 minute clock-skew freshness policy
//! - A reference server-side verifier with constant-time comparison
//!
//! ## Architecture
//!
//! The codebase is organized into focused modules:
//! - `models/` - Data structures: header records, signed requests, rejections
//! - `handlers/` - HTTP request handlers for the reference agent endpoint
//! - `services/` - Signer, verifier, skew policy, guard, signed transport
//! - `utils/` - Canonical string and HMAC primitives
//! - `config/` - Credentials and verifier configuration from the environment
//!
//! ## Quick Start
//!
//! ```no_run
//! use ledgermind_auth::{Credentials, Signer};
//!
//! let signer = Signer::new(Credentials::from_env());
//! let signed = signer.sign("POST", "/agent/chat", br#"{"messages":[]}"#)?;
//! // attach signed.headers and transmit signed.body unmodified
//! # Ok::<(), ledgermind_auth::SignError>(())
//! ```

// Core modules
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types and functions for convenience
pub use config::{CredentialStore, Credentials, VerifyConfig};
pub use handlers::{chat, create_agent_app, TEST_MODE_HEADER};
pub use models::{
    AuthHeaders, ChatMessage, ChatRequest, ChatResponse, Rejection, SignedRequest, VerifyResult,
    CLIENT_ID_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
pub use services::{
    is_fresh, rejection_response, require_signature, SignError, SignedClient, SignedClientError,
    Signer, Verifier, DEFAULT_SKEW_WINDOW_MS,
};
pub use utils::hmac as hmac_utils;
