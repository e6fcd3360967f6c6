//! Secret resolution
//!
//! A [`SecretResolver`] is picked once at startup from the [`ResolverConfig`]:
//! environment variables when no project is configured, Secret Manager
//! otherwise. Callers normally use [`SecretResolver::resolve_or`], which never
//! fails and hands back the fallback instead.
//!
//! [`ResolverConfig`]: secretsd_core::ResolverConfig

mod local;
mod metadata;
mod remote;
mod resolver;


pub use local::EnvResolver;
pub use metadata::MetadataTokenClient;
pub use remote::SecretManagerResolver;
pub use resolver::{from_config, SecretResolver};
