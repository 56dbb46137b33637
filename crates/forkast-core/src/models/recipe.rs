// ABOUTME: Recipe, step, and timer models with difficulty levels
// ABOUTME: Defines stored recipe shapes and the validated creation payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::validation::Violations;

/// How demanding a recipe is to prepare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    /// Beginner friendly
    Easy,
    /// Some technique required
    Medium,
    /// Experienced cooks
    Hard,
}

impl Difficulty {
    /// Storage and wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EASY" => Ok(Self::Easy),
            "MEDIUM" => Ok(Self::Medium),
            "HARD" => Ok(Self::Hard),
            other => Err(AppError::invalid_input(format!(
                "Unknown difficulty '{other}', expected EASY, MEDIUM or HARD"
            ))),
        }
    }
}

/// A countdown attached to a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timer {
    /// Timer identifier
    pub id: i64,
    /// Duration in seconds
    pub duration_seconds: u32,
    /// What the timer is for
    pub description: String,
}

/// One instruction of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Step identifier
    pub id: i64,
    /// Position within the recipe, starting at 1
    pub order_number: u32,
    /// Instruction text
    pub description: String,
    /// Optional illustration
    pub image_url: Option<String>,
    /// Optional timer owned by this step
    pub timer: Option<Timer>,
}

/// An ingredient as referenced by a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeIngredient {
    /// Catalog ingredient identifier
    pub id: i64,
    /// Ingredient name
    pub name: String,
    /// Optional grouping
    pub category: Option<String>,
    /// Optional measurement unit
    pub unit: Option<String>,
}

/// A stored recipe with its ingredients and ordered steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    /// Recipe identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Optional long description
    pub description: Option<String>,
    /// Cover image reference
    pub image_url: String,
    /// Required ingredients
    pub ingredients: Vec<RecipeIngredient>,
    /// Steps ordered by `order_number`
    pub steps: Vec<Step>,
    /// Preparation time in minutes
    pub preparation_time: Option<u32>,
    /// Cooking time in minutes
    pub cooking_time: Option<u32>,
    /// Number of servings
    pub servings: Option<u32>,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// How many users bookmarked this recipe
    pub bookmark_count: u32,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Names of the recipe's ingredients
    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().map(|ingredient| ingredient.name.as_str())
    }

    /// Whether any ingredient name appears in `names`
    #[must_use]
    pub fn uses_any(&self, names: &BTreeSet<String>) -> bool {
        self.ingredient_names().any(|name| names.contains(name))
    }
}

/// Timer payload nested in [`NewStep`]
#[derive(Debug, Clone, Deserialize)]
pub struct NewTimer {
    /// Duration in seconds
    pub duration_seconds: i64,
    /// What the timer is for
    pub description: String,
}

/// Step payload nested in [`NewRecipe`]
#[derive(Debug, Clone, Deserialize)]
pub struct NewStep {
    /// Position within the recipe
    pub order_number: i64,
    /// Instruction text
    pub description: String,
    /// Optional illustration
    #[serde(default)]
    pub image_url: Option<String>,
    /// Optional timer
    #[serde(default)]
    pub timer: Option<NewTimer>,
}

/// Ingredient reference payload nested in [`NewRecipe`]
#[derive(Debug, Clone, Deserialize)]
pub struct NewRecipeIngredient {
    /// Catalog ingredient name; created on first use
    pub name: String,
    /// Optional grouping
    #[serde(default)]
    pub category: Option<String>,
    /// Optional measurement unit
    #[serde(default)]
    pub unit: Option<String>,
}

/// Request payload for creating a recipe
///
/// Numeric fields are signed so that out-of-range values reach
/// [`NewRecipe::validate`] and are reported as constraint violations.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRecipe {
    /// Display name
    pub name: String,
    /// Optional long description
    #[serde(default)]
    pub description: Option<String>,
    /// Cover image reference
    pub image_url: String,
    /// Required ingredients
    pub ingredients: Vec<NewRecipeIngredient>,
    /// Ordered steps
    pub steps: Vec<NewStep>,
    /// Preparation time in minutes
    #[serde(default)]
    pub preparation_time: Option<i64>,
    /// Cooking time in minutes
    #[serde(default)]
    pub cooking_time: Option<i64>,
    /// Number of servings
    #[serde(default)]
    pub servings: Option<i64>,
    /// Difficulty level
    pub difficulty: Difficulty,
}

impl NewRecipe {
    /// Check every field constraint of a recipe and its steps
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error listing every violated constraint
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Violations::new();

        v.length_between(
            "name",
            &self.name,
            limits::RECIPE_NAME_MIN_CHARS,
            limits::RECIPE_NAME_MAX_CHARS,
        );
        if let Some(description) = &self.description {
            v.max_length(
                "description",
                description,
                limits::RECIPE_DESCRIPTION_MAX_CHARS,
            );
        }
        v.not_blank("image_url", &self.image_url);

        v.check(!self.ingredients.is_empty(), || {
            "ingredients must not be empty".to_owned()
        });
        for ingredient in &self.ingredients {
            v.not_blank("ingredient name", &ingredient.name);
            v.max_length(
                "ingredient name",
                ingredient.name.trim(),
                limits::INGREDIENT_NAME_MAX_CHARS,
            );
        }

        v.check(!self.steps.is_empty(), || "steps must not be empty".to_owned());
        let mut seen_orders = HashSet::new();
        for step in &self.steps {
            v.positive("step order", step.order_number);
            v.check(seen_orders.insert(step.order_number), || {
                format!("step order {} is used more than once", step.order_number)
            });
            v.length_between(
                "step description",
                &step.description,
                limits::STEP_DESCRIPTION_MIN_CHARS,
                limits::STEP_DESCRIPTION_MAX_CHARS,
            );
            if let Some(timer) = &step.timer {
                v.positive("timer duration", timer.duration_seconds);
                v.not_blank("timer description", &timer.description);
            }
        }

        v.positive_if_present("preparation_time", self.preparation_time);
        v.positive_if_present("cooking_time", self.cooking_time);
        v.positive_if_present("servings", self.servings);

        v.into_result()
    }
}
