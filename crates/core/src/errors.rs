use std::net::SocketAddr;

/// Result type alias for secretsd operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for secretsd operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Transport-level failures talking to an upstream
    #[error("network error for '{endpoint}': {message}")]
    Network { endpoint: String, message: String },

    /// Upstream answered with a non-success HTTP status
    #[error("upstream '{endpoint}' responded with HTTP {status}")]
    Upstream { endpoint: String, status: u16 },

    /// Upstream body could not be decoded into the expected shape
    #[error("malformed response from '{endpoint}': {message}")]
    MalformedResponse { endpoint: String, message: String },

    /// Secret Manager reported an application-level error code
    #[error("secret '{name}' access failed with error {code} - status {status}")]
    SecretApi {
        name: String,
        code: i64,
        status: String,
    },

    /// Secret name that cannot be addressed as a single URL path segment
    #[error("invalid secret name '{name}': {message}")]
    InvalidSecretName { name: String, message: String },

    /// Secret payload was not valid base64 or not valid UTF-8
    #[error("failed to decode payload of secret '{name}': {message}")]
    Decode { name: String, message: String },

    /// Listener could not be bound
    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

// Helper methods for creating errors with context
impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a network error
    #[must_use]
    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Network {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create an upstream status error
    #[must_use]
    pub fn upstream(endpoint: impl Into<String>, status: u16) -> Self {
        Error::Upstream {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Create a malformed response error
    #[must_use]
    pub fn malformed_response(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Error::MalformedResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a Secret Manager error from the code and status it reported
    #[must_use]
    pub fn secret_api(name: impl Into<String>, code: i64, status: impl Into<String>) -> Self {
        Error::SecretApi {
            name: name.into(),
            code,
            status: status.into(),
        }
    }

    /// Create an invalid secret name error
    #[must_use]
    pub fn invalid_secret_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidSecretName {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a payload decode error
    #[must_use]
    pub fn decode(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Decode {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a listener bind error
    #[must_use]
    pub fn bind(addr: SocketAddr, source: std::io::Error) -> Self {
        Error::Bind { addr, source }
    }

    /// Short, stable label for the failure category, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Configuration { .. } => "configuration",
            Error::Network { .. } => "network",
            Error::Upstream { .. } => "upstream_status",
            Error::MalformedResponse { .. } => "malformed_response",
            Error::SecretApi { .. } => "secret_api",
            Error::InvalidSecretName { .. } => "invalid_secret_name",
            Error::Decode { .. } => "decode",
            Error::Bind { .. } => "bind",
        }
    }
}
