//! Shared utilities for secretsd
//!
//! Currently this is the logging setup shared by the binary and anything that
//! embeds the service.

pub mod tracing;
