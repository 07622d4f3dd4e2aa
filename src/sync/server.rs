//! Standalone HTTP host for the sync endpoint
//!
//! `grabby serve` runs this when no dev-server plugin carries the
//! endpoint: it accepts grabs on the same routes the generated adapters
//! use, serves the inspector script, and hosts a small demo page.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::config;
use crate::setup::assets;
use crate::sync::store::GrabStore;

/// Bind address for the standalone server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: config::DEFAULT_HOST.to_string(),
            port: config::DEFAULT_PORT,
        }
    }
}

/// Build the sync router.
///
/// Grabs are accepted on both the plugin route and the Next.js route so
/// a client configured for either flavor can talk to this host. CORS is
/// wide open: the page being inspected runs on the dev server's origin,
/// not ours.
pub fn router(store: Arc<GrabStore>) -> Router {
    Router::new()
        .route("/", get(demo_page))
        .route("/healthz", get(health))
        .route(config::CLIENT_ROUTE, get(client_script))
        .route(config::SYNC_ROUTE, post(sync_element))
        .route(config::NEXT_SYNC_ROUTE, post(sync_element))
        .layer(CorsLayer::permissive())
        .with_state(store)
}

async fn sync_element(
    State(store): State<Arc<GrabStore>>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            error!("discarding unparseable grab: {err}");
            return sync_failed(err.to_string());
        }
    };

    match store.record(payload) {
        Ok(()) => {
            info!("grabbed element written to {}", store.path().display());
            (StatusCode::OK, Json(json!({ "success": true })))
        }
        Err(err) => {
            error!("grab rejected: {err}");
            sync_failed(err.to_string())
        }
    }
}

fn sync_failed(detail: String) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": format!("Sync Failed: {detail}") })),
    )
}

async fn client_script() -> ([(header::HeaderName, &'static str); 1], &'static str) {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        assets::CLIENT_SCRIPT,
    )
}

async fn demo_page() -> Html<&'static str> {
    Html(assets::DEMO_PAGE)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// The running server: a [`GrabStore`] behind a bound listener
pub struct SyncServer {
    config: ServerConfig,
    store: Arc<GrabStore>,
}

impl SyncServer {
    pub fn new(config: ServerConfig, store: GrabStore) -> Self {
        Self {
            config,
            store: Arc::new(store),
        }
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Could not bind {addr}"))?;

        info!("sync endpoint listening on http://{addr}{}", config::SYNC_ROUTE);
        info!("grabs will be written to {}", self.store.path().display());

        axum::serve(listener, router(self.store))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Sync server terminated unexpectedly")?;

        info!("sync endpoint stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
