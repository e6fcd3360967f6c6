//! Core domain types, errors, and constants for `secretsd`.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum and `Result` alias covering every failure
//!   a secret lookup or the service startup can run into.
//! - **`config`**: `ResolverConfig` and `ServiceConfig`, built once at process
//!   start and passed explicitly to whatever needs them.
//! - **`constants`**: environment variable names, header names and default
//!   upstream URLs.

pub mod config;
pub mod constants;
pub mod errors;

pub use self::{
    config::{ResolverConfig, ServiceConfig},
    constants::*,
    errors::{Error, Result},
};
