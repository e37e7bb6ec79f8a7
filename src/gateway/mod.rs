//! Axum gateway: hosts the assembled [`AppConfig`].
//!
//! Proxy routes are forwarded to their upstream untouched; everything else is
//! served locally. Security headers are attached to every response by a
//! middleware layer, including proxied and error responses.
//!
//! ## URL layout
//!
//! ```text
//! GET  /manifest.json        PWA manifest
//! GET  /_i18n/locales        locale list
//! GET  /_i18n/{code}         messages for one locale (fallback-merged)
//! GET  /_runtime-config      public runtime config
//! GET  /favicon.ico          → 204
//! *    <proxy route>         → upstream
//! GET  /*path                → HTML shell
//! ```

mod headers;
mod pages;
mod proxy;

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderName, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::config::proxy::find_route;
use crate::error::AppError;

/// Router state injected into every handler.
///
/// Cheap to clone; all fields are reference-counted.
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<AppConfig>,
    /// Shared upstream client for proxied requests.
    client: reqwest::Client,
    /// Pre-rendered security headers; empty when the policy does not apply.
    security_headers: Arc<[(HeaderName, HeaderValue)]>,
}

impl GatewayState {
    pub fn new(config: Arc<AppConfig>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .no_proxy()
            .build()?;

        let security_headers = if config.security.applies_to(config.environment.as_deref()) {
            render_security_headers(&config)?
        } else {
            Vec::new()
        };

        Ok(Self {
            config,
            client,
            security_headers: security_headers.into(),
        })
    }
}

/// Every policy header must render; a response without one is never served.
fn render_security_headers(config: &AppConfig) -> Result<Vec<(HeaderName, HeaderValue)>, AppError> {
    config
        .security
        .headers()
        .into_iter()
        .map(|(name, value)| {
            HeaderValue::from_str(&value)
                .map(|v| (HeaderName::from_static(name), v))
                .map_err(|e| AppError::Config(format!("{name}: {e}")))
        })
        .collect()
}

pub struct Gateway {
    state: GatewayState,
}

impl Gateway {
    pub fn new(config: Arc<AppConfig>) -> Result<Self, AppError> {
        Ok(Self { state: GatewayState::new(config)? })
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Bind `server.host:server.port` and serve until `shutdown` is cancelled.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), AppError> {
        let bind_addr = self.state.config.server.bind_addr();
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| AppError::Server(format!("bind failed on {bind_addr}: {e}")))?;

        info!(%bind_addr, routes = self.state.config.proxy_routes.len(), "gateway listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .map_err(|e| AppError::Server(format!("server error: {e}")))?;

        info!("gateway shut down");
        Ok(())
    }
}

pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/manifest.json", get(pages::manifest))
        .route("/_i18n/locales", get(pages::locales))
        .route("/_i18n/{code}", get(pages::messages))
        .route("/_runtime-config", get(pages::runtime_config))
        .route("/favicon.ico", get(|| async { StatusCode::NO_CONTENT }))
        .fallback(dispatch)
        .layer(middleware::from_fn_with_state(state.clone(), headers::apply_security_headers))
        .with_state(state)
}

/// Anything not routed above: proxy if a route claims it, else the HTML shell.
async fn dispatch(State(state): State<GatewayState>, req: Request) -> Response {
    let route = find_route(&state.config.proxy_routes, req.uri().path()).cloned();
    if let Some(route) = route {
        debug!(upstream = route.upstream.as_str(), path = %req.uri().path(), "proxying");
        return proxy::forward(&state.client, &route, req).await;
    }

    if req.method() != Method::GET && req.method() != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    pages::shell(&state.config, req.headers())
}
