//! HTTP request handlers.

pub mod agent;

pub use agent::*;
