// ABOUTME: Ingredient-overlap recipe search
// ABOUTME: Returns recipes sharing at least the fixed minimum number of ingredient names with a query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use std::collections::BTreeSet;
use std::sync::Arc;

use forkast_core::constants::matching::MIN_MATCHING_INGREDIENTS;
use forkast_core::errors::AppResult;
use forkast_core::models::Recipe;
use tracing::debug;

use crate::database::Database;

/// Finds recipes by the ingredients a cook has on hand
#[derive(Clone)]
pub struct MatchingEngine {
    database: Arc<Database>,
}

impl MatchingEngine {
    /// Create a matching engine over the recipe store
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Recipes whose ingredient names overlap `names` in at least
    /// [`MIN_MATCHING_INGREDIENTS`] distinct names
    ///
    /// An empty `names` set returns every recipe. Names are compared exactly;
    /// unknown names simply match nothing. Results are in ascending recipe id
    /// order with no ranking.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails
    pub async fn find_by_ingredients(&self, names: &BTreeSet<String>) -> AppResult<Vec<Recipe>> {
        if names.is_empty() {
            debug!("Empty ingredient query, returning all recipes");
            return self.database.list_recipes().await;
        }

        self.database
            .find_recipes_by_ingredient_names(names, MIN_MATCHING_INGREDIENTS)
            .await
    }
}
