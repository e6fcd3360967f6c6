#![allow(dead_code)]

use async_trait::async_trait;
use secretsd::server::{self, AppState};
use secretsd::SecretResolver;
use secretsd_core::{Error, Result};
use std::sync::Arc;

/// A running server bound to an ephemeral local port
pub struct TestServer {
    base_url: String,
}

impl TestServer {
    /// Start serving with `resolver` until the test runtime shuts down
    pub async fn start(resolver: Arc<dyn SecretResolver>) -> Self {
        let listener = server::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(server::serve(
            listener,
            AppState::new(resolver),
            std::future::pending(),
        ));

        Self {
            base_url: format!("http://{addr}"),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Resolver with a canned answer
pub struct FixedResolver(pub Option<&'static str>);

#[async_trait]
impl SecretResolver for FixedResolver {
    async fn resolve(&self, _name: &str) -> Result<Option<String>> {
        Ok(self.0.map(str::to_string))
    }

    fn source(&self) -> &'static str {
        "fixed"
    }
}

/// Resolver whose every lookup fails
pub struct FailingResolver;

#[async_trait]
impl SecretResolver for FailingResolver {
    async fn resolve(&self, name: &str) -> Result<Option<String>> {
        Err(Error::secret_api(name, 7, "PERMISSION_DENIED"))
    }

    fn source(&self) -> &'static str {
        "failing"
    }
}

/// Sets an environment variable for the lifetime of the guard
pub struct EnvVarGuard {
    name: String,
    original: Option<String>,
}

impl EnvVarGuard {
    pub fn set(name: &str, value: &str) -> Self {
        let original = std::env::var(name).ok();
        std::env::set_var(name, value);
        Self {
            name: name.to_string(),
            original,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.original {
            Some(value) => std::env::set_var(&self.name, value),
            None => std::env::remove_var(&self.name),
        }
    }
}
