//! Data models shared by the signer, verifier and HTTP surfaces.

pub mod agent;
pub mod auth;

pub use agent::*;
pub use auth::*;
