//! Memoir Storage Server
//!
//! HTTP boundary in front of the remote key-value store. Every route forwards
//! to the injected [`KvHandle`] and answers with the uniform storage envelope.

pub mod handlers;
pub mod settings;

use axum::{routing::get, Router};
use memoir_core::{KvHandle, MemoryKv};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use settings::ServerSettings;

/// How often the in-process mock store drops expired keys
const MOCK_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub kv: Arc<KvHandle>,
    pub settings: Arc<ServerSettings>,
}

impl AppState {
    pub fn with_kv(kv: KvHandle, settings: ServerSettings) -> Self {
        Self {
            kv: Arc::new(kv),
            settings: Arc::new(settings),
        }
    }

    /// Pick the key-value backend the settings ask for.
    ///
    /// In mock mode an in-process store seeded with empty collections stands in
    /// for the hosted one, so every call succeeds without remote configuration.
    /// Must be called inside a Tokio runtime.
    pub fn from_settings(settings: ServerSettings) -> Self {
        let kv = if settings.mock_storage {
            warn!("Mock storage enabled: data lives in memory and is lost on restart");
            let mock = MemoryKv::seeded();
            mock.spawn_sweeper(MOCK_SWEEP_INTERVAL);
            KvHandle::with_store(Arc::new(mock))
        } else {
            let handle = KvHandle::from_env();
            match handle.config() {
                Some(config) => info!("Remote store configured at {}", config.url),
                None => warn!("Remote store not configured, storage routes will fail"),
            }
            handle
        };

        Self::with_kv(kv, settings)
    }
}

pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        // Liveness
        .route("/health", get(handlers::health))
        .nest("/api", api_routes());

    // Static site shell with SPA fallback
    if let Some(dir) = state.settings.static_dir.clone() {
        info!("Static files directory: {}", dir.display());
        let index = dir.join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/storage/health-check",
            get(handlers::health::storage_health),
        )
        .route(
            "/storage/:key",
            get(handlers::storage::get)
                .post(handlers::storage::save)
                .delete(handlers::storage::delete),
        )
        .route("/kv-debug", get(handlers::debug::kv_debug))
        .route(
            "/test-kv",
            get(handlers::debug::kv_test).post(handlers::debug::kv_test),
        )
}
