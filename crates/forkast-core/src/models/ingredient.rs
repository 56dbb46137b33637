// ABOUTME: Ingredient model with per-user usage tracking
// ABOUTME: Pantry ingredients belong to a user, catalog ingredients are referenced by recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::limits;
use crate::errors::AppResult;
use crate::validation::Violations;

/// A named ingredient
///
/// Rows with an owner form that user's pantry and carry usage metadata.
/// Rows without an owner are catalog entries shared by recipes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    /// Ingredient identifier
    pub id: i64,
    /// Ingredient name, compared exactly when matching recipes
    pub name: String,
    /// Optional grouping such as "spice" or "dairy"
    pub category: Option<String>,
    /// Optional measurement unit
    pub unit: Option<String>,
    /// Owning user; `None` for catalog ingredients
    pub user_id: Option<Uuid>,
    /// Last time the owner used this ingredient
    pub last_used: Option<DateTime<Utc>>,
    /// How many times the owner has used this ingredient
    pub usage_count: u32,
}

impl Ingredient {
    /// Whether this ingredient belongs to a user's pantry
    #[must_use]
    pub const fn is_pantry_item(&self) -> bool {
        self.user_id.is_some()
    }
}

/// Request payload for adding an ingredient to a pantry
#[derive(Debug, Clone, Deserialize)]
pub struct NewIngredient {
    /// Ingredient name
    pub name: String,
    /// Optional grouping
    #[serde(default)]
    pub category: Option<String>,
    /// Optional measurement unit
    #[serde(default)]
    pub unit: Option<String>,
}

impl NewIngredient {
    /// Check field constraints
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error listing every violated constraint
    pub fn validate(&self) -> AppResult<()> {
        let mut violations = Violations::new();
        violations.not_blank("name", &self.name);
        violations.max_length("name", self.name.trim(), limits::INGREDIENT_NAME_MAX_CHARS);
        violations.into_result()
    }
}
