// ABOUTME: Recommendation filter built on recent ingredient usage
// ABOUTME: Matches recent ingredients to recipes, drops allergen recipes, keeps preferred ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

//! Recommendations
//!
//! The candidate list comes from the [`MatchingEngine`] fed with the names of
//! the user's recently used ingredients. Allergen exclusion is applied before
//! preference inclusion, and the matcher's order is preserved.

use std::collections::BTreeSet;
use std::sync::Arc;

use forkast_core::errors::AppResult;
use forkast_core::models::Recipe;
use tracing::debug;

use super::MatchingEngine;
use crate::database::{Database, TagKind};

/// Suggests recipes from what a user has been cooking with
#[derive(Clone)]
pub struct RecommendationFilter {
    database: Arc<Database>,
    matcher: MatchingEngine,
    recent_limit: u32,
}

impl RecommendationFilter {
    /// Create a recommendation filter
    ///
    /// `recent_limit` caps how many recently used ingredients feed the matcher.
    #[must_use]
    pub const fn new(database: Arc<Database>, matcher: MatchingEngine, recent_limit: u32) -> Self {
        Self {
            database,
            matcher,
            recent_limit,
        }
    }

    /// Recommended recipes for the user with `user_email`
    ///
    /// With no recent ingredients the matcher returns every recipe, which is
    /// then filtered the same way.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user does not exist
    pub async fn recommend(&self, user_email: &str) -> AppResult<Vec<Recipe>> {
        let user = self.database.require_user_by_email(user_email).await?;

        let recent = self
            .database
            .recent_ingredients(user.id, self.recent_limit)
            .await?;
        let recent_names: BTreeSet<String> =
            recent.into_iter().map(|ingredient| ingredient.name).collect();

        let candidates = self.matcher.find_by_ingredients(&recent_names).await?;
        let allergies = self.database.get_user_tags(user.id, TagKind::Allergy).await?;
        let preferences = self
            .database
            .get_user_tags(user.id, TagKind::Preference)
            .await?;

        let total = candidates.len();
        let recommended = filter_candidates(candidates, &allergies, &preferences);
        debug!(
            user.email = %user_email,
            candidates = total,
            recommended = recommended.len(),
            "Computed recommendations"
        );
        Ok(recommended)
    }
}

/// Drop recipes containing an allergen, then keep recipes containing a preference
///
/// Order of `candidates` is preserved. An empty preference set therefore
/// yields no recommendations.
#[must_use]
pub fn filter_candidates(
    candidates: Vec<Recipe>,
    allergies: &BTreeSet<String>,
    preferences: &BTreeSet<String>,
) -> Vec<Recipe> {
    candidates
        .into_iter()
        .filter(|recipe| !recipe.uses_any(allergies))
        .filter(|recipe| recipe.uses_any(preferences))
        .collect()
}
