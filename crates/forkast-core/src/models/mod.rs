// ABOUTME: Domain models for users, recipes, steps, timers, and ingredients
// ABOUTME: Stored shapes plus the request payloads that create them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

/// Pantry and catalog ingredients
pub mod ingredient;
/// Recipes with their steps, timers, and difficulty
pub mod recipe;
/// User accounts and profiles
pub mod user;

pub use ingredient::{Ingredient, NewIngredient};
pub use recipe::{
    Difficulty, NewRecipe, NewRecipeIngredient, NewStep, NewTimer, Recipe, RecipeIngredient,
    Step, Timer,
};
pub use user::{User, UserProfile};
