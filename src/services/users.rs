// ABOUTME: User profile reads and taste-profile updates
// ABOUTME: Aggregates bookmarks, tags, and recent ingredients; replaces preference and allergy sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use std::sync::Arc;

use forkast_core::errors::AppResult;
use forkast_core::models::UserProfile;
use forkast_core::validation::normalize_tags;
use tracing::info;

use crate::database::{Database, TagKind};

/// Profile operations for the authenticated user
#[derive(Clone)]
pub struct UserProfiles {
    database: Arc<Database>,
    recent_limit: u32,
}

impl UserProfiles {
    /// Create the profile service
    #[must_use]
    pub const fn new(database: Arc<Database>, recent_limit: u32) -> Self {
        Self {
            database,
            recent_limit,
        }
    }

    /// Everything known about the user besides credentials
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user does not exist
    pub async fn profile(&self, user_email: &str) -> AppResult<UserProfile> {
        let user = self.database.require_user_by_email(user_email).await?;

        Ok(UserProfile {
            id: user.id,
            email: user.email,
            preferences: self
                .database
                .get_user_tags(user.id, TagKind::Preference)
                .await?,
            allergies: self.database.get_user_tags(user.id, TagKind::Allergy).await?,
            bookmarked_recipe_ids: self.database.bookmarked_recipe_ids(user.id).await?,
            recent_ingredients: self
                .database
                .recent_ingredients(user.id, self.recent_limit)
                .await?,
            created_at: user.created_at,
            last_active: user.last_active,
        })
    }

    /// Replace the user's preference tags
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for overlong tags, or `ResourceNotFound` if the
    /// user does not exist
    pub async fn set_preferences(&self, user_email: &str, tags: &[String]) -> AppResult<UserProfile> {
        self.replace_tags(user_email, tags, TagKind::Preference)
            .await
    }

    /// Replace the user's allergy tags
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for overlong tags, or `ResourceNotFound` if the
    /// user does not exist
    pub async fn set_allergies(&self, user_email: &str, tags: &[String]) -> AppResult<UserProfile> {
        self.replace_tags(user_email, tags, TagKind::Allergy).await
    }

    async fn replace_tags(
        &self,
        user_email: &str,
        tags: &[String],
        kind: TagKind,
    ) -> AppResult<UserProfile> {
        let tags = normalize_tags(tags)?;
        let user = self.database.require_user_by_email(user_email).await?;
        self.database.replace_user_tags(user.id, kind, &tags).await?;
        info!(user.email = %user_email, kind = kind.as_str(), count = tags.len(), "Updated user tags");
        self.profile(user_email).await
    }
}
