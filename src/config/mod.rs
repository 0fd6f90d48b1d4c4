//! Configuration structures and loading utilities.
//!
//! This module contains the configuration structures used by the crate,
//! including environment variable loading and default values.

pub mod credentials;
pub mod verify;

pub use credentials::*;
pub use verify::*;
