/// Constants used throughout the secretsd codebase
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

// Environment variable names
pub const GCP_PROJECT_VAR: &str = "GCP_PROJECT";
pub const SECRETSD_BIND_VAR: &str = "SECRETSD_BIND";
pub const SECRETSD_METADATA_TOKEN_URL_VAR: &str = "SECRETSD_METADATA_TOKEN_URL";
pub const SECRETSD_SECRET_MANAGER_ENDPOINT_VAR: &str = "SECRETSD_SECRET_MANAGER_ENDPOINT";
pub const SECRETSD_HTTP_TIMEOUT_SECS_VAR: &str = "SECRETSD_HTTP_TIMEOUT_SECS";

// Listener
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));

// HTTP surface
pub const GET_SECRET_PATH: &str = "/get-secret";
pub const SECRET_HEADER: &str = "secret";

// Instance metadata service
pub const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";
pub const METADATA_FLAVOR_HEADER: &str = "Metadata-Flavor";
pub const METADATA_FLAVOR_VALUE: &str = "Google";

// Secret Manager
pub const SECRET_MANAGER_ENDPOINT: &str = "https://content-secretmanager.googleapis.com/v1beta1";
pub const LATEST_VERSION_ACCESS: &str = "latest:access";
