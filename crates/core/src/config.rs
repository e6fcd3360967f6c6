//! Process configuration
//!
//! Both types are built once at startup, from the environment and then from
//! command-line overrides, and are read-only afterwards.

use crate::constants::{
    DEFAULT_BIND_ADDR, GCP_PROJECT_VAR, METADATA_TOKEN_URL, SECRETSD_BIND_VAR,
    SECRETSD_HTTP_TIMEOUT_SECS_VAR, SECRETSD_METADATA_TOKEN_URL_VAR,
    SECRETSD_SECRET_MANAGER_ENDPOINT_VAR, SECRET_MANAGER_ENDPOINT,
};
use crate::errors::{Error, Result};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Settings that select and drive the secret resolution strategy.
///
/// Without a project the resolver reads the process environment; with one it
/// talks to Secret Manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    project: Option<String>,
    metadata_token_url: String,
    secret_manager_endpoint: String,
    http_timeout: Option<Duration>,
}

impl ResolverConfig {
    /// Configuration for environment-variable lookups
    pub fn local() -> Self {
        Self {
            project: None,
            metadata_token_url: METADATA_TOKEN_URL.to_string(),
            secret_manager_endpoint: SECRET_MANAGER_ENDPOINT.to_string(),
            http_timeout: None,
        }
    }

    /// Configuration for Secret Manager lookups in `project`.
    ///
    /// A blank project id yields local mode.
    pub fn remote(project: impl Into<String>) -> Self {
        Self::local().with_project(Some(project.into()))
    }

    /// Build from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let timeout = non_blank(SECRETSD_HTTP_TIMEOUT_SECS_VAR)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let mut config = Self::local()
            .with_project(lookup(GCP_PROJECT_VAR))
            .with_timeout(timeout);
        if let Some(url) = non_blank(SECRETSD_METADATA_TOKEN_URL_VAR) {
            config = config.with_metadata_token_url(url);
        }
        if let Some(endpoint) = non_blank(SECRETSD_SECRET_MANAGER_ENDPOINT_VAR) {
            config = config.with_secret_manager_endpoint(endpoint);
        }
        config
    }

    /// Replace the project; blank values clear it
    #[must_use]
    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.project = project
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        self
    }

    #[must_use]
    pub fn with_metadata_token_url(mut self, url: impl Into<String>) -> Self {
        self.metadata_token_url = url.into();
        self
    }

    #[must_use]
    pub fn with_secret_manager_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.secret_manager_endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn is_remote(&self) -> bool {
        self.project.is_some()
    }

    pub fn metadata_token_url(&self) -> &str {
        &self.metadata_token_url
    }

    pub fn secret_manager_endpoint(&self) -> &str {
        &self.secret_manager_endpoint
    }

    /// Outbound request timeout; `None` leaves the HTTP client default
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::local()
    }
}

/// Everything the service needs to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind: SocketAddr,
    pub resolver: ResolverConfig,
}

impl ServiceConfig {
    /// Build from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = match lookup(SECRETSD_BIND_VAR).filter(|value| !value.trim().is_empty()) {
            Some(value) => value.trim().parse::<SocketAddr>().map_err(|e| {
                Error::configuration(format!("invalid {SECRETSD_BIND_VAR} '{value}': {e}"))
            })?,
            None => DEFAULT_BIND_ADDR,
        };

        Ok(Self {
            bind,
            resolver: ResolverConfig::from_lookup(lookup),
        })
    }
}
