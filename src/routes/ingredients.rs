// ABOUTME: Pantry ingredient route handlers
// ABOUTME: Adds ingredients, records usage, and serves recent, frequent, and search listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use forkast_core::errors::AppError;
use forkast_core::models::{Ingredient, NewIngredient};
use serde::{Deserialize, Serialize};

use crate::middleware::{authenticate_headers, AuthenticatedUser};
use crate::resources::ServerResources;

/// Query for `GET /ingredients/search`
#[derive(Debug, Deserialize)]
pub struct IngredientSearchQuery {
    /// Substring to look for in ingredient names
    #[serde(default)]
    pub q: String,
}

/// A list of pantry ingredients
#[derive(Debug, Serialize)]
pub struct IngredientListResponse {
    /// Ingredients in listing order
    pub ingredients: Vec<Ingredient>,
    /// Number of ingredients returned
    pub total: usize,
}

impl From<Vec<Ingredient>> for IngredientListResponse {
    fn from(ingredients: Vec<Ingredient>) -> Self {
        Self {
            total: ingredients.len(),
            ingredients,
        }
    }
}

/// Ingredient routes handler
pub struct IngredientRoutes;

impl IngredientRoutes {
    /// Create all ingredient routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/ingredients",
                get(Self::handle_list).post(Self::handle_add),
            )
            .route("/ingredients/recent", get(Self::handle_recent))
            .route("/ingredients/frequent", get(Self::handle_frequent))
            .route("/ingredients/search", get(Self::handle_search))
            .route("/ingredients/:id/use", post(Self::handle_record_use))
            .with_state(resources)
    }

    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthenticatedUser, AppError> {
        authenticate_headers(headers, &resources.auth_manager)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let caller = Self::authenticate(&headers, &resources)?;
        let ingredients = resources.ingredients.list(&caller.email).await?;
        Ok((StatusCode::OK, Json(IngredientListResponse::from(ingredients))).into_response())
    }

    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<NewIngredient>,
    ) -> Result<Response, AppError> {
        let caller = Self::authenticate(&headers, &resources)?;
        let ingredient = resources
            .ingredients
            .add_ingredient(&caller.email, &request)
            .await?;
        Ok((StatusCode::CREATED, Json(ingredient)).into_response())
    }

    async fn handle_recent(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let caller = Self::authenticate(&headers, &resources)?;
        let ingredients = resources.ingredients.recent(&caller.email).await?;
        Ok((StatusCode::OK, Json(IngredientListResponse::from(ingredients))).into_response())
    }

    async fn handle_frequent(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let caller = Self::authenticate(&headers, &resources)?;
        let ingredients = resources.ingredients.most_used(&caller.email).await?;
        Ok((StatusCode::OK, Json(IngredientListResponse::from(ingredients))).into_response())
    }

    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<IngredientSearchQuery>,
    ) -> Result<Response, AppError> {
        let caller = Self::authenticate(&headers, &resources)?;
        let ingredients = resources
            .ingredients
            .search(&caller.email, &query.q)
            .await?;
        Ok((StatusCode::OK, Json(IngredientListResponse::from(ingredients))).into_response())
    }

    async fn handle_record_use(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(ingredient_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let caller = Self::authenticate(&headers, &resources)?;
        let ingredient = resources
            .ingredients
            .record_use(&caller.email, ingredient_id)
            .await?;
        Ok((StatusCode::OK, Json(ingredient)).into_response())
    }
}
