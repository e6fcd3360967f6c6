use super::resolver::SecretResolver;
use async_trait::async_trait;
use secretsd_core::Result;
use std::env;

/// Resolves secrets from environment variables of the same name
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvResolver;

impl EnvResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SecretResolver for EnvResolver {
    async fn resolve(&self, name: &str) -> Result<Option<String>> {
        // Names the platform cannot look up are simply absent
        if name.is_empty() || name.contains(['=', '\0']) {
            return Ok(None);
        }

        // Non-Unicode values count as unset
        Ok(env::var(name).ok())
    }

    fn source(&self) -> &'static str {
        "env"
    }
}
