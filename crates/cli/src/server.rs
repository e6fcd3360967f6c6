//! HTTP surface
//!
//! One route, `GET /get-secret`, reading the secret name from the `secret`
//! request header and answering with `{"name": ..., "value": ...}`.

use crate::secrets::SecretResolver;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use secretsd_core::{Error, Result, GET_SECRET_PATH, SECRET_HEADER};
use serde::Serialize;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    resolver: Arc<dyn SecretResolver>,
}

impl AppState {
    pub fn new(resolver: Arc<dyn SecretResolver>) -> Self {
        Self { resolver }
    }
}

/// Body of a successful lookup
#[derive(Debug, Serialize)]
pub struct SecretResponse<'a> {
    pub name: &'a str,
    pub value: String,
}

/// Value handed back when `name` cannot be resolved
pub fn default_fallback(name: &str) -> String {
    format!("default-for-{name}")
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(GET_SECRET_PATH, any(get_secret))
        .with_state(state)
}

async fn get_secret(State(state): State<AppState>, method: Method, headers: HeaderMap) -> Response {
    debug!(%method, path = GET_SECRET_PATH, "handling request");

    if method != Method::GET {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let Some(name) = headers
        .get(SECRET_HEADER)
        .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
        .filter(|value| !value.is_empty())
    else {
        debug!("request without a usable secret header");
        return StatusCode::BAD_REQUEST.into_response();
    };

    let fallback = default_fallback(name);
    let value = state.resolver.resolve_or(name, &fallback).await;

    match serde_json::to_vec(&SecretResponse { name, value }) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(err) => {
            error!(secret = %name, error = %err, "failed to encode secret response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Bind the listening socket
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| Error::bind(addr, e))
}

/// Serve requests on `listener` until `shutdown` completes, then drain
/// in-flight requests.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "listening");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Completes on Ctrl-C or, on unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
