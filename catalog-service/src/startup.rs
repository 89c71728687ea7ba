//! Application startup and lifecycle management.

use crate::config::CatalogConfig;
use crate::handlers;
use crate::services::{CatalogService, MongoProductStore, ProductStore, UnavailableStore};
use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            catalog: CatalogService::new(store),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // Literal product routes are registered ahead of `/:id`
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/api/products", get(handlers::list_products))
        .route("/api/products/flash-sale", get(handlers::flash_sale))
        .route("/api/products/most-popular", get(handlers::most_popular))
        .route("/api/products/filter", get(handlers::filter_products))
        .route("/api/products/:id", get(handlers::get_product))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Builds the MongoDB store. A connection string that does not parse is
/// logged and replaced by [`UnavailableStore`] so the process still serves
/// (failing) requests. Nothing here touches the network.
pub fn open_store(config: &CatalogConfig) -> Arc<dyn ProductStore> {
    match MongoProductStore::new(&config.mongodb.uri, config.mongodb.database.as_deref()) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to MongoDB");
            Arc::new(UnavailableStore)
        }
    }
}

/// Pings the store once in the background and logs the outcome.
fn spawn_startup_ping(store: Arc<dyn ProductStore>) {
    tokio::spawn(async move {
        match store.health_check().await {
            Ok(()) => tracing::info!("Connected to MongoDB"),
            Err(e) => tracing::error!(error = %e, "Failed to connect to MongoDB"),
        }
    });
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(config: CatalogConfig) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Server running on port {}", port);

        let store = open_store(&config);
        spawn_startup_ping(store.clone());
        let router = build_router(AppState::new(store));

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
