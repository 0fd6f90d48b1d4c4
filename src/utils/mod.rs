//! Utility modules.
//!
//! Low-level HMAC and canonical-string helpers shared by the signer and
//! the verifier.

pub mod hmac;

pub use hmac::*;
