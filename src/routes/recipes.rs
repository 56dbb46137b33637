// ABOUTME: Recipe route handlers for search, CRUD, bookmarks, and recommendations
// ABOUTME: Maps REST endpoints onto the matching engine and recipe services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use forkast_core::errors::AppError;
use forkast_core::models::{Difficulty, NewRecipe, Recipe};
use forkast_core::validation::parse_ingredient_list;
use serde::{Deserialize, Serialize};

use crate::middleware::{authenticate_headers, AuthenticatedUser};
use crate::resources::ServerResources;

/// Query parameters accepted by `GET /recipes`
#[derive(Debug, Default, Deserialize)]
pub struct RecipeSearchQuery {
    /// Comma separated ingredient names
    pub ingredients: Option<String>,
    /// Difficulty filter, case-insensitive
    pub difficulty: Option<String>,
}

/// A list of recipes with its size
#[derive(Debug, Serialize)]
pub struct RecipeListResponse {
    /// Matching recipes
    pub recipes: Vec<Recipe>,
    /// Number of recipes returned
    pub total: usize,
}

impl From<Vec<Recipe>> for RecipeListResponse {
    fn from(recipes: Vec<Recipe>) -> Self {
        Self {
            total: recipes.len(),
            recipes,
        }
    }
}

/// Outcome of a bookmark add or remove
#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    /// Recipe that was targeted
    pub recipe_id: i64,
    /// Whether the recipe is bookmarked after the call
    pub bookmarked: bool,
    /// Whether the call changed anything
    pub changed: bool,
}

/// Recipe routes handler
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/recipes",
                get(Self::handle_search).post(Self::handle_create),
            )
            .route("/recipes/bookmarks", get(Self::handle_list_bookmarks))
            .route(
                "/recipes/recommendations",
                get(Self::handle_recommendations),
            )
            .route(
                "/recipes/:id",
                get(Self::handle_get).delete(Self::handle_delete),
            )
            .route(
                "/recipes/:id/bookmark",
                post(Self::handle_bookmark).delete(Self::handle_unbookmark),
            )
            .with_state(resources)
    }

    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthenticatedUser, AppError> {
        authenticate_headers(headers, &resources.auth_manager)
    }

    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<RecipeSearchQuery>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;

        let recipes = match (query.ingredients.as_deref(), query.difficulty.as_deref()) {
            (Some(_), Some(_)) => {
                return Err(AppError::invalid_input(
                    "Filter by ingredients or difficulty, not both",
                ));
            }
            (Some(raw), None) => {
                let names = parse_ingredient_list(raw)?;
                resources.matcher.find_by_ingredients(&names).await?
            }
            (None, Some(raw)) => {
                let difficulty: Difficulty = raw.parse()?;
                resources.recipes.find_by_difficulty(difficulty).await?
            }
            (None, None) => {
                resources
                    .matcher
                    .find_by_ingredients(&BTreeSet::new())
                    .await?
            }
        };

        Ok((StatusCode::OK, Json(RecipeListResponse::from(recipes))).into_response())
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let recipe = resources.recipes.get_recipe(recipe_id).await?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<NewRecipe>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        let recipe = resources.recipes.create_recipe(&request).await?;
        Ok((StatusCode::CREATED, Json(recipe)).into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources)?;
        resources.recipes.delete_recipe(recipe_id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    async fn handle_bookmark(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let caller = Self::authenticate(&headers, &resources)?;
        let changed = resources
            .bookmarks
            .bookmark(recipe_id, &caller.email)
            .await?;

        let response = BookmarkResponse {
            recipe_id,
            bookmarked: true,
            changed,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn handle_unbookmark(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let caller = Self::authenticate(&headers, &resources)?;
        let changed = resources
            .bookmarks
            .unbookmark(recipe_id, &caller.email)
            .await?;

        let response = BookmarkResponse {
            recipe_id,
            bookmarked: false,
            changed,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn handle_list_bookmarks(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let caller = Self::authenticate(&headers, &resources)?;
        let recipes = resources.bookmarks.list_bookmarks(&caller.email).await?;
        Ok((StatusCode::OK, Json(RecipeListResponse::from(recipes))).into_response())
    }

    async fn handle_recommendations(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let caller = Self::authenticate(&headers, &resources)?;
        let recipes = resources.recommendations.recommend(&caller.email).await?;
        Ok((StatusCode::OK, Json(RecipeListResponse::from(recipes))).into_response())
    }
}
