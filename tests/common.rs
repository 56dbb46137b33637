// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, test resources, and user and recipe fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `forkast_server`

use std::sync::{Arc, Once};

use anyhow::Result;
use forkast_core::models::{
    Difficulty, NewRecipe, NewRecipeIngredient, NewStep, NewTimer, Recipe, User,
};
use forkast_server::{
    auth::PasswordHasher,
    config::{
        AuthConfig, CorsConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel, ServerConfig,
    },
    database::Database,
    resources::ServerResources,
};

static INIT_LOGGER: Once = Once::new();

/// Lowest bcrypt cost, keeps hashing fast in tests
pub const TEST_BCRYPT_COST: u32 = 4;

/// Password used by [`create_test_user`]
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration for tests: in-memory store, fixed secret, cheap bcrypt
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        host: "127.0.0.1".to_owned(),
        environment: Environment::Testing,
        log_level: LogLevel::Warn,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_owned(),
            jwt_expiry_hours: 1,
            bcrypt_cost: TEST_BCRYPT_COST,
        },
        cors: CorsConfig {
            allowed_origins: vec!["*".to_owned()],
        },
        request_timeout_secs: 5,
        recent_ingredients_limit: 20,
    }
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    Ok(Arc::new(Database::new(&DatabaseUrl::Memory).await?))
}

/// Fully wired resources over a fresh in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    init_test_logging();
    let database = Database::new(&DatabaseUrl::Memory).await?;
    Ok(Arc::new(ServerResources::new(test_config(), database)))
}

/// Insert a user whose password is [`TEST_PASSWORD`]
pub async fn create_test_user(database: &Database, email: &str) -> Result<User> {
    let hash = PasswordHasher::new(TEST_BCRYPT_COST)
        .hash(TEST_PASSWORD)
        .await?;
    let user = User::new(email.to_owned(), hash);
    database.create_user(&user).await?;
    Ok(user)
}

/// A valid recipe using the given ingredient names, with one timed step
pub fn sample_recipe(name: &str, ingredients: &[&str]) -> NewRecipe {
    NewRecipe {
        name: name.to_owned(),
        description: Some(format!("{name} for testing")),
        image_url: "https://img.forkast.app/recipe.png".to_owned(),
        ingredients: ingredients
            .iter()
            .map(|ingredient| NewRecipeIngredient {
                name: (*ingredient).to_owned(),
                category: None,
                unit: None,
            })
            .collect(),
        steps: vec![
            NewStep {
                order_number: 1,
                description: "Prepare every ingredient".to_owned(),
                image_url: None,
                timer: None,
            },
            NewStep {
                order_number: 2,
                description: "Cook everything together".to_owned(),
                image_url: None,
                timer: Some(NewTimer {
                    duration_seconds: 600,
                    description: "Simmer".to_owned(),
                }),
            },
        ],
        preparation_time: Some(10),
        cooking_time: Some(20),
        servings: Some(2),
        difficulty: Difficulty::Easy,
    }
}

/// Store [`sample_recipe`] and return it
pub async fn create_test_recipe(
    database: &Database,
    name: &str,
    ingredients: &[&str],
) -> Result<Recipe> {
    Ok(database
        .create_recipe(&sample_recipe(name, ingredients))
        .await?)
}

/// Ids of a recipe list, in order
pub fn ids(recipes: &[Recipe]) -> Vec<i64> {
    recipes.iter().map(|recipe| recipe.id).collect()
}
