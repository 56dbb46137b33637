// ABOUTME: Recipe catalogue operations
// ABOUTME: Lookup by id or difficulty, validated creation, and transactional deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use std::sync::Arc;

use forkast_core::errors::{AppError, AppResult};
use forkast_core::models::{Difficulty, NewRecipe, Recipe};
use tracing::info;

use crate::database::Database;

/// Read and write access to the recipe catalogue
#[derive(Clone)]
pub struct RecipeCatalog {
    database: Arc<Database>,
}

impl RecipeCatalog {
    /// Create a catalogue over the recipe store
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Fetch a recipe by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no recipe has this id
    pub async fn get_recipe(&self, recipe_id: i64) -> AppResult<Recipe> {
        self.database
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))
    }

    /// Validate and store a new recipe
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` listing every violated field constraint, or a
    /// database error
    pub async fn create_recipe(&self, request: &NewRecipe) -> AppResult<Recipe> {
        request.validate()?;
        let recipe = self.database.create_recipe(request).await?;
        info!(
            recipe.id = recipe.id,
            recipe.name = %recipe.name,
            ingredients = recipe.ingredients.len(),
            steps = recipe.steps.len(),
            "Recipe created"
        );
        Ok(recipe)
    }

    /// Delete a recipe with its steps, timers, ingredient links, and bookmarks
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no recipe has this id
    pub async fn delete_recipe(&self, recipe_id: i64) -> AppResult<()> {
        if !self.database.delete_recipe(recipe_id).await? {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }
        info!(recipe.id = recipe_id, "Recipe deleted");
        Ok(())
    }

    /// Recipes of one difficulty in ascending id order
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails
    pub async fn find_by_difficulty(&self, difficulty: Difficulty) -> AppResult<Vec<Recipe>> {
        self.database.find_recipes_by_difficulty(difficulty).await
    }
}
