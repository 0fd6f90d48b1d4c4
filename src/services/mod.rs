//! Core services: signing, skew policy, verification, and HTTP glue.

pub mod client;
pub mod guard;
pub mod signer;
pub mod skew;
pub mod verifier;

pub use client::*;
pub use guard::*;
pub use signer::*;
pub use skew::*;
pub use verifier::*;
