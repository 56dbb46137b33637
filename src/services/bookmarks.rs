// ABOUTME: Bookmark manager toggling recipes in a user's bookmark set
// ABOUTME: Adds and removes are idempotent and each runs as one store transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use std::sync::Arc;

use forkast_core::errors::AppResult;
use forkast_core::models::Recipe;

use crate::database::{BookmarkChange, Database};
use crate::logging::AppLogger;

/// Maintains each user's set of bookmarked recipes
#[derive(Clone)]
pub struct BookmarkManager {
    database: Arc<Database>,
}

impl BookmarkManager {
    /// Create a bookmark manager over the store
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Add a recipe to the user's bookmarks; a repeat is a no-op
    ///
    /// Returns whether the bookmark was newly added.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user or recipe does not exist
    pub async fn bookmark(&self, recipe_id: i64, user_email: &str) -> AppResult<bool> {
        self.apply(recipe_id, user_email, BookmarkChange::Add).await
    }

    /// Remove a recipe from the user's bookmarks; a missing bookmark is a no-op
    ///
    /// Returns whether a bookmark was removed.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user or recipe does not exist
    pub async fn unbookmark(&self, recipe_id: i64, user_email: &str) -> AppResult<bool> {
        self.apply(recipe_id, user_email, BookmarkChange::Remove)
            .await
    }

    /// The user's bookmarked recipes in ascending id order
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user does not exist
    pub async fn list_bookmarks(&self, user_email: &str) -> AppResult<Vec<Recipe>> {
        let user = self.database.require_user_by_email(user_email).await?;
        self.database.bookmarked_recipes(user.id).await
    }

    async fn apply(&self, recipe_id: i64, user_email: &str, change: BookmarkChange) -> AppResult<bool> {
        let changed = self
            .database
            .change_bookmark(user_email, recipe_id, change)
            .await?;
        AppLogger::log_bookmark_event(user_email, recipe_id, change.as_str(), changed);
        Ok(changed)
    }
}
