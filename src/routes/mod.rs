// ABOUTME: HTTP route modules for the Forkast REST API
// ABOUTME: One axum router per domain, merged into the application router in server.rs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

//! Route handlers
//!
//! Handlers are thin: they authenticate the caller, translate the request,
//! call one service, and serialize the result. Errors flow out as
//! [`forkast_core::errors::AppError`], which renders its own JSON response.

/// Registration and login
pub mod auth;
/// Liveness and store connectivity
pub mod health;
/// Pantry ingredients
pub mod ingredients;
/// Recipes, bookmarks, and recommendations
pub mod recipes;
/// Profile and taste preferences
pub mod users;

pub use auth::{AuthRoutes, AuthService};
pub use health::HealthRoutes;
pub use ingredients::IngredientRoutes;
pub use recipes::RecipeRoutes;
pub use users::UserRoutes;
