//! Resolver trait and strategy selection

use super::local::EnvResolver;
use super::remote::SecretManagerResolver;
use async_trait::async_trait;
use secretsd_core::{ResolverConfig, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Trait for resolving secrets from a single source
#[async_trait]
pub trait SecretResolver: Send + Sync {
    /// Resolve a secret by name
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Secret was resolved successfully
    /// * `Ok(None)` - The source has no secret with this name
    /// * `Err(error)` - The lookup itself failed
    async fn resolve(&self, name: &str) -> Result<Option<String>>;

    /// Short label for the backing source, used in logs
    fn source(&self) -> &'static str;

    /// Resolve `name`, returning `fallback` when it is absent or the lookup
    /// fails.
    ///
    /// Failures are reported only through the log; callers always get a
    /// usable value.
    async fn resolve_or(&self, name: &str, fallback: &str) -> String {
        match self.resolve(name).await {
            Ok(Some(value)) => {
                info!(secret = %name, source = self.source(), "secret resolved");
                value
            }
            Ok(None) => {
                info!(
                    secret = %name,
                    source = self.source(),
                    "secret not found, using fallback"
                );
                fallback.to_string()
            }
            Err(err) => {
                warn!(
                    secret = %name,
                    source = self.source(),
                    error_kind = err.kind(),
                    error = %err,
                    "secret resolution failed, using fallback"
                );
                fallback.to_string()
            }
        }
    }
}

/// Build the resolver selected by `config`
///
/// A configured project selects Secret Manager; otherwise secrets come from
/// the process environment.
pub fn from_config(config: &ResolverConfig) -> Result<Arc<dyn SecretResolver>> {
    if config.is_remote() {
        Ok(Arc::new(SecretManagerResolver::new(config)?))
    } else {
        Ok(Arc::new(EnvResolver::new()))
    }
}
