// ABOUTME: HTTP server assembly and lifecycle
// ABOUTME: Merges domain routers, applies tower layers, and serves until ctrl-c
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::database::Database;
use crate::middleware::{request_id_middleware, setup_cors};
use crate::resources::ServerResources;
use crate::routes::{AuthRoutes, HealthRoutes, IngredientRoutes, RecipeRoutes, UserRoutes};

/// Build the application router with every route and layer
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let timeout = Duration::from_secs(resources.config.request_timeout_secs);
    let cors = setup_cors(&resources.config.cors);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(AuthRoutes::routes(Arc::clone(&resources)))
        .merge(RecipeRoutes::routes(Arc::clone(&resources)))
        .merge(IngredientRoutes::routes(Arc::clone(&resources)))
        .merge(UserRoutes::routes(resources))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}

/// Open the store, build resources, and serve HTTP until shutdown
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the database cannot be
/// opened, or the listener cannot bind
pub async fn run(config: ServerConfig) -> Result<()> {
    config.validate()?;

    let database = Database::new(&config.database.url)
        .await
        .context("Failed to initialize database")?;
    info!(url = %config.database.url.to_connection_string(), "Database ready");

    let address = config.bind_address();
    let resources = Arc::new(ServerResources::new(config, database));
    let app = build_router(resources);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!(%address, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await;
}

/// Resolve once `signal` fires; if listening fails, never resolve
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for shutdown signal; running until killed");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signal_listener_failure_keeps_server_running() {
        let failing = async { Err(io::Error::other("no signal handler")) };

        let waited =
            tokio::time::timeout(Duration::from_millis(50), wait_for_shutdown(failing)).await;

        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_signal_resolves_shutdown() {
        let waited =
            tokio::time::timeout(Duration::from_millis(50), wait_for_shutdown(async { Ok(()) }))
                .await;

        assert!(waited.is_ok());
    }
}
