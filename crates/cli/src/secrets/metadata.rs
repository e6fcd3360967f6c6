//! Access tokens from the instance metadata service

use secretsd_core::{Error, Result, METADATA_FLAVOR_HEADER, METADATA_FLAVOR_VALUE};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Fetches the service account token of the instance the process runs on.
///
/// Every call goes to the metadata server; tokens are not cached.
#[derive(Debug, Clone)]
pub struct MetadataTokenClient {
    token_url: String,
    client: reqwest::Client,
}

impl MetadataTokenClient {
    pub fn new(token_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            token_url: token_url.into(),
            client,
        }
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Request a fresh access token
    pub async fn access_token(&self) -> Result<String> {
        debug!(url = %self.token_url, "requesting metadata access token");

        let response = self
            .client
            .get(&self.token_url)
            .header(METADATA_FLAVOR_HEADER, METADATA_FLAVOR_VALUE)
            .send()
            .await
            .map_err(|e| Error::network(&self.token_url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream(&self.token_url, status.as_u16()));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::malformed_response(&self.token_url, e.to_string()))?;

        Ok(token.access_token)
    }
}
