// ABOUTME: Domain service layer for recipe matching, bookmarks, recommendations, and profiles
// ABOUTME: Protocol-agnostic business logic used by the REST routes and directly by tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

//! Domain service layer
//!
//! Route handlers authenticate the caller and translate HTTP; everything
//! else lives here. Each service is built once at startup from an
//! `Arc<Database>` and shared through `ServerResources`.

/// Idempotent bookmark add/remove and bookmark listings
pub mod bookmarks;

/// Pantry ingredients and usage tracking
pub mod ingredients;

/// Ingredient-overlap recipe search
pub mod matching;

/// Recipe retrieval, creation, and deletion
pub mod recipes;

/// Allergy- and preference-aware recommendations
pub mod recommendations;

/// Profile reads and preference/allergy updates
pub mod users;

pub use bookmarks::BookmarkManager;
pub use ingredients::IngredientTracker;
pub use matching::MatchingEngine;
pub use recipes::RecipeCatalog;
pub use recommendations::RecommendationFilter;
pub use users::UserProfiles;
