// ABOUTME: Shared server resources built once at startup
// ABOUTME: Wires the database, auth components, and domain services for the HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use std::sync::Arc;

use crate::auth::{AuthManager, PasswordHasher};
use crate::config::ServerConfig;
use crate::database::Database;
use crate::services::{
    BookmarkManager, IngredientTracker, MatchingEngine, RecipeCatalog, RecommendationFilter,
    UserProfiles,
};

/// Everything a request handler needs, shared behind one `Arc`
#[derive(Clone)]
pub struct ServerResources {
    /// Immutable server configuration
    pub config: Arc<ServerConfig>,
    /// Relational store
    pub database: Arc<Database>,
    /// Session token issuer and validator
    pub auth_manager: Arc<AuthManager>,
    /// bcrypt hashing on the blocking pool
    pub password_hasher: PasswordHasher,
    /// Ingredient-overlap recipe search
    pub matcher: MatchingEngine,
    /// Bookmark add/remove and listing
    pub bookmarks: BookmarkManager,
    /// Allergy- and preference-aware recommendations
    pub recommendations: RecommendationFilter,
    /// Recipe retrieval, creation, and deletion
    pub recipes: RecipeCatalog,
    /// Pantry ingredients and usage tracking
    pub ingredients: IngredientTracker,
    /// Profile reads and tag updates
    pub users: UserProfiles,
}

impl ServerResources {
    /// Construct every service from configuration and an open database
    #[must_use]
    pub fn new(config: ServerConfig, database: Database) -> Self {
        let database = Arc::new(database);
        let recent_limit = config.recent_ingredients_limit;

        let auth_manager = Arc::new(AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.jwt_expiry_hours,
        ));
        let password_hasher = PasswordHasher::new(config.auth.bcrypt_cost);

        let matcher = MatchingEngine::new(Arc::clone(&database));
        let recommendations =
            RecommendationFilter::new(Arc::clone(&database), matcher.clone(), recent_limit);

        Self {
            bookmarks: BookmarkManager::new(Arc::clone(&database)),
            recipes: RecipeCatalog::new(Arc::clone(&database)),
            ingredients: IngredientTracker::new(Arc::clone(&database), recent_limit),
            users: UserProfiles::new(Arc::clone(&database), recent_limit),
            matcher,
            recommendations,
            auth_manager,
            password_hasher,
            database,
            config: Arc::new(config),
        }
    }
}
