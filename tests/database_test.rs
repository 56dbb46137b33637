// ABOUTME: Tests for database setup against file-backed SQLite
// ABOUTME: Covers directory creation, idempotent migrations, and persistence across reopen
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::error::Error;

use common::{create_test_recipe, create_test_user, init_test_logging};
use forkast_server::config::DatabaseUrl;
use forkast_server::database::Database;
use tempfile::TempDir;

#[tokio::test]
async fn test_file_database_survives_reopen() -> Result<(), Box<dyn Error>> {
    init_test_logging();
    let dir = TempDir::new()?;
    let url = DatabaseUrl::SQLite {
        path: dir.path().join("nested").join("forkast.db"),
    };

    let (user_id, recipe_id) = {
        let database = Database::new(&url).await?;
        let user = create_test_user(&database, "cook@forkast.app").await?;
        let recipe = create_test_recipe(&database, "Pepper Soup", &["salt", "pepper"]).await?;
        database.pool().close().await;
        (user.id, recipe.id)
    };

    let reopened = Database::new(&url).await?;
    reopened.migrate().await?;

    let user = reopened.get_user(user_id).await?.expect("user persisted");
    assert_eq!(user.email, "cook@forkast.app");
    let recipe = reopened.get_recipe(recipe_id).await?.expect("recipe persisted");
    assert_eq!(recipe.ingredients.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_violates_unique_constraint() -> Result<(), Box<dyn Error>> {
    init_test_logging();
    let database = Database::new(&DatabaseUrl::Memory).await?;
    create_test_user(&database, "cook@forkast.app").await?;

    let err = create_test_user(&database, "cook@forkast.app")
        .await
        .unwrap_err();
    let err = err
        .downcast_ref::<forkast_core::errors::AppError>()
        .expect("store error");
    assert_eq!(
        err.code,
        forkast_core::errors::ErrorCode::ResourceAlreadyExists
    );
    Ok(())
}

#[tokio::test]
async fn test_ping_succeeds_on_fresh_database() -> Result<(), Box<dyn Error>> {
    init_test_logging();
    let database = Database::new(&DatabaseUrl::Memory).await?;
    database.ping().await?;
    assert_eq!(database.count_users().await?, 0);
    Ok(())
}
