//! secretsd: serve secrets over HTTP from the environment or Google Secret
//! Manager.
//!
//! - **`secrets`**: the resolver strategies and the fallback policy.
//! - **`server`**: the axum router, listener and shutdown plumbing.

pub mod secrets;
pub mod server;

pub use secrets::{from_config, SecretResolver};
pub use server::{router, AppState};
