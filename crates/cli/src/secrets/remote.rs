//! Google Secret Manager resolver
//!
//! Each lookup asks the metadata server for a token and then reads the latest
//! version of the secret with it. The response carries an application-level
//! error code next to a base64 payload:
//!
//! ```json
//! {"error": 0, "status": "", "payload": {"data": "c2VjcmV0"}}
//! ```

use super::metadata::MetadataTokenClient;
use super::resolver::SecretResolver;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Url;
use secretsd_core::{Error, ResolverConfig, Result, LATEST_VERSION_ACCESS};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
struct AccessResponse {
    #[serde(default)]
    error: i64,
    #[serde(default)]
    status: String,
    #[serde(default)]
    payload: Payload,
}

#[derive(Debug, Default, Deserialize)]
struct Payload {
    #[serde(default)]
    data: String,
}

/// Resolves secrets from Secret Manager in a single project
#[derive(Debug, Clone)]
pub struct SecretManagerResolver {
    project: String,
    endpoint: Url,
    tokens: MetadataTokenClient,
    client: reqwest::Client,
}

impl SecretManagerResolver {
    /// Create a resolver from a remote-mode configuration
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        let project = config
            .project()
            .ok_or_else(|| Error::configuration("Secret Manager resolution requires a project id"))?
            .to_string();

        let endpoint = Url::parse(config.secret_manager_endpoint()).map_err(|e| {
            Error::configuration(format!(
                "invalid Secret Manager endpoint '{}': {e}",
                config.secret_manager_endpoint()
            ))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(Error::configuration(format!(
                "Secret Manager endpoint '{endpoint}' cannot carry a path"
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            project,
            endpoint,
            tokens: MetadataTokenClient::new(config.metadata_token_url(), client.clone()),
            client,
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// `{endpoint}/projects/{project}/secrets/{name}/versions/latest:access`
    ///
    /// Each part is a single percent-encoded path segment. `.` and `..` are
    /// rejected since URL normalisation would drop them.
    pub fn access_url(&self, name: &str) -> Result<Url> {
        if matches!(name, "." | "..") {
            return Err(Error::invalid_secret_name(
                name,
                "dot segments cannot be used as a secret name",
            ));
        }

        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "projects",
                self.project.as_str(),
                "secrets",
                name,
                "versions",
                LATEST_VERSION_ACCESS,
            ]);
        }
        Ok(url)
    }

    async fn access_latest(&self, name: &str, url: Url, token: &str) -> Result<String> {
        let endpoint = url.to_string();
        debug!(secret = %name, url = %endpoint, "accessing latest secret version");

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::network(&endpoint, e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::network(&endpoint, e.to_string()))?;

        // An error code in the body says more than the HTTP status, so parse first
        let access: AccessResponse = match serde_json::from_slice(&body) {
            Ok(access) => access,
            Err(_) if !status.is_success() => {
                return Err(Error::upstream(&endpoint, status.as_u16()))
            }
            Err(e) => return Err(Error::malformed_response(&endpoint, e.to_string())),
        };

        if access.error != 0 {
            return Err(Error::secret_api(name, access.error, access.status));
        }
        if !status.is_success() {
            return Err(Error::upstream(&endpoint, status.as_u16()));
        }

        let bytes = STANDARD
            .decode(access.payload.data.as_bytes())
            .map_err(|e| Error::decode(name, e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| Error::decode(name, e.to_string()))
    }
}

#[async_trait]
impl SecretResolver for SecretManagerResolver {
    async fn resolve(&self, name: &str) -> Result<Option<String>> {
        let url = self.access_url(name)?;
        let token = self.tokens.access_token().await?;
        self.access_latest(name, url, &token).await.map(Some)
    }

    fn source(&self) -> &'static str {
        "secret-manager"
    }
}
