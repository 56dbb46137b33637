// ABOUTME: Pantry ingredient tracking per user
// ABOUTME: Adds ingredients, records their use, and lists them by recency, frequency, or name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use std::sync::Arc;

use forkast_core::constants::defaults::FREQUENT_INGREDIENTS_LIMIT;
use forkast_core::errors::{AppError, AppResult};
use forkast_core::models::{Ingredient, NewIngredient};

use crate::database::Database;

/// Keeps each user's pantry and its usage history
#[derive(Clone)]
pub struct IngredientTracker {
    database: Arc<Database>,
    recent_limit: u32,
}

impl IngredientTracker {
    /// Create a tracker; `recent_limit` caps the recent-ingredients list
    #[must_use]
    pub const fn new(database: Arc<Database>, recent_limit: u32) -> Self {
        Self {
            database,
            recent_limit,
        }
    }

    /// Add an ingredient to the user's pantry, unused so far
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank or overlong name, or
    /// `ResourceNotFound` if the user does not exist
    pub async fn add_ingredient(
        &self,
        user_email: &str,
        request: &NewIngredient,
    ) -> AppResult<Ingredient> {
        request.validate()?;
        let user = self.database.require_user_by_email(user_email).await?;
        self.database.add_pantry_ingredient(user.id, request).await
    }

    /// Record a use of one of the user's ingredients
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user does not exist or does not own
    /// the ingredient
    pub async fn record_use(&self, user_email: &str, ingredient_id: i64) -> AppResult<Ingredient> {
        let user = self.database.require_user_by_email(user_email).await?;
        self.database
            .record_ingredient_use(user.id, ingredient_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Ingredient {ingredient_id}")))
    }

    /// The user's whole pantry, most recently used first
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user does not exist
    pub async fn list(&self, user_email: &str) -> AppResult<Vec<Ingredient>> {
        let user = self.database.require_user_by_email(user_email).await?;
        self.database.list_pantry_ingredients(user.id).await
    }

    /// The user's recently used ingredients, newest first
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user does not exist
    pub async fn recent(&self, user_email: &str) -> AppResult<Vec<Ingredient>> {
        let user = self.database.require_user_by_email(user_email).await?;
        self.database
            .recent_ingredients(user.id, self.recent_limit)
            .await
    }

    /// The user's ingredients by descending usage count
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user does not exist
    pub async fn most_used(&self, user_email: &str) -> AppResult<Vec<Ingredient>> {
        let user = self.database.require_user_by_email(user_email).await?;
        self.database
            .most_used_ingredients(user.id, FREQUENT_INGREDIENTS_LIMIT)
            .await
    }

    /// The user's ingredients whose name contains `term`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank term, or `ResourceNotFound` if the
    /// user does not exist
    pub async fn search(&self, user_email: &str, term: &str) -> AppResult<Vec<Ingredient>> {
        if term.trim().is_empty() {
            return Err(AppError::invalid_input("search term must not be blank"));
        }
        let user = self.database.require_user_by_email(user_email).await?;
        self.database.search_ingredients(user.id, term).await
    }
}
