// ABOUTME: Health check route for service monitoring
// ABOUTME: Reports liveness and whether the store answers a trivial query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::error;

use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Response {
        let (status, database) = match resources.database.ping().await {
            Ok(()) => (StatusCode::OK, "ok"),
            Err(e) => {
                error!(error = %e, "Database health check failed");
                (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
            }
        };

        let body = serde_json::json!({
            "status": if status.is_success() { "healthy" } else { "degraded" },
            "database": database,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });
        (status, Json(body)).into_response()
    }
}
