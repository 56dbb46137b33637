// ABOUTME: User account and profile models
// ABOUTME: Accounts carry credentials, profiles aggregate bookmarks, tags, and recent ingredients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Ingredient;

/// A registered account
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Login email, unique across users
    pub email: String,
    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Registration time
    pub created_at: DateTime<Utc>,
    /// Last time the user changed any of their data
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new account with a fresh id
    #[must_use]
    pub fn new(email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            created_at: now,
            last_active: now,
        }
    }
}

/// Everything the service knows about a user besides credentials
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    /// User identifier
    pub id: Uuid,
    /// Login email
    pub email: String,
    /// Preference tags, matched against recipe ingredient names
    pub preferences: BTreeSet<String>,
    /// Allergen tags, matched against recipe ingredient names
    pub allergies: BTreeSet<String>,
    /// Ids of bookmarked recipes
    pub bookmarked_recipe_ids: BTreeSet<i64>,
    /// Recently used pantry ingredients, newest first
    pub recent_ingredients: Vec<Ingredient>,
    /// Registration time
    pub created_at: DateTime<Utc>,
    /// Last activity time
    pub last_active: DateTime<Utc>,
}
