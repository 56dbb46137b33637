// ABOUTME: Profile route handlers for the authenticated user
// ABOUTME: Serves the profile and replaces preference and allergy tag sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use forkast_core::errors::AppError;
use serde::Deserialize;

use crate::middleware::authenticate_headers;
use crate::resources::ServerResources;

/// Body of the tag replacement endpoints
#[derive(Debug, Deserialize)]
pub struct UpdateTagsRequest {
    /// Complete new tag set
    pub tags: Vec<String>,
}

/// User profile routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create the `/users/me` routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/users/me", get(Self::handle_profile))
            .route("/users/me/preferences", put(Self::handle_set_preferences))
            .route("/users/me/allergies", put(Self::handle_set_allergies))
            .with_state(resources)
    }

    async fn handle_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let caller = authenticate_headers(&headers, &resources.auth_manager)?;
        let profile = resources.users.profile(&caller.email).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    async fn handle_set_preferences(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<UpdateTagsRequest>,
    ) -> Result<Response, AppError> {
        let caller = authenticate_headers(&headers, &resources.auth_manager)?;
        let profile = resources
            .users
            .set_preferences(&caller.email, &request.tags)
            .await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    async fn handle_set_allergies(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<UpdateTagsRequest>,
    ) -> Result<Response, AppError> {
        let caller = authenticate_headers(&headers, &resources.auth_manager)?;
        let profile = resources
            .users
            .set_allergies(&caller.email, &request.tags)
            .await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}
