// ABOUTME: Integration tests for the recipe catalogue and its store
// ABOUTME: Covers creation, validation failures, difficulty filtering, and cascading deletes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::error::Error;

use common::{create_test_database, create_test_user, ids, sample_recipe};
use forkast_core::errors::ErrorCode;
use forkast_core::models::Difficulty;
use forkast_server::services::{BookmarkManager, RecipeCatalog};

#[tokio::test]
async fn test_create_recipe_persists_everything() -> Result<(), Box<dyn Error>> {
    let database = create_test_database().await?;
    let catalog = RecipeCatalog::new(database.clone());

    let created = catalog
        .create_recipe(&sample_recipe("Tomato Soup", &["tomato", "basil", "salt"]))
        .await?;
    let fetched = catalog.get_recipe(created.id).await?;

    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Tomato Soup");
    assert_eq!(fetched.difficulty, Difficulty::Easy);
    assert_eq!(
        fetched.ingredient_names().collect::<Vec<_>>(),
        vec!["tomato", "basil", "salt"]
    );
    assert_eq!(
        fetched.steps.iter().map(|s| s.order_number).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(
        fetched.steps[1].timer.as_ref().map(|t| t.duration_seconds),
        Some(600)
    );
    Ok(())
}

#[tokio::test]
async fn test_catalog_ingredients_are_shared_between_recipes() -> Result<(), Box<dyn Error>> {
    let database = create_test_database().await?;
    let catalog = RecipeCatalog::new(database);

    let soup = catalog
        .create_recipe(&sample_recipe("Tomato Soup", &["tomato", "salt"]))
        .await?;
    let salad = catalog
        .create_recipe(&sample_recipe("Tomato Salad", &["tomato", "oil"]))
        .await?;

    assert_eq!(soup.ingredients[0].id, salad.ingredients[0].id);
    Ok(())
}

#[tokio::test]
async fn test_invalid_recipe_rejected_with_all_violations() -> Result<(), Box<dyn Error>> {
    let database = create_test_database().await?;
    let catalog = RecipeCatalog::new(database.clone());

    let mut request = sample_recipe("No", &["salt"]);
    request.preparation_time = Some(-5);
    request.steps[0].description = "short".to_owned();

    let err = catalog.create_recipe(&request).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    let violations = err.details["violations"].as_array().expect("violations");
    assert!(violations.len() >= 3);

    assert!(database.list_recipes().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_recipe_without_steps_rejected() -> Result<(), Box<dyn Error>> {
    let database = create_test_database().await?;
    let catalog = RecipeCatalog::new(database);

    let mut request = sample_recipe("Air Sandwich", &["bread"]);
    request.steps.clear();

    let err = catalog.create_recipe(&request).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_delete_removes_steps_timers_and_bookmarks() -> Result<(), Box<dyn Error>> {
    let database = create_test_database().await?;
    let catalog = RecipeCatalog::new(database.clone());
    let bookmarks = BookmarkManager::new(database.clone());
    let user = create_test_user(&database, "cook@forkast.app").await?;

    let recipe = catalog
        .create_recipe(&sample_recipe("Tomato Soup", &["tomato", "salt"]))
        .await?;
    bookmarks.bookmark(recipe.id, &user.email).await?;
    assert_eq!(database.count_timers().await?, 1);

    catalog.delete_recipe(recipe.id).await?;

    assert_eq!(database.count_timers().await?, 0);
    assert!(bookmarks.list_bookmarks(&user.email).await?.is_empty());
    let err = catalog.get_recipe(recipe.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_delete_unknown_recipe_is_not_found() -> Result<(), Box<dyn Error>> {
    let database = create_test_database().await?;
    let catalog = RecipeCatalog::new(database);

    let err = catalog.delete_recipe(42).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert_eq!(err.message, "Recipe 42 not found");
    Ok(())
}

#[tokio::test]
async fn test_find_by_difficulty() -> Result<(), Box<dyn Error>> {
    let database = create_test_database().await?;
    let catalog = RecipeCatalog::new(database);

    let easy = catalog
        .create_recipe(&sample_recipe("Tomato Soup", &["tomato", "salt"]))
        .await?;
    let mut hard_request = sample_recipe("Beef Wellington", &["beef", "pastry"]);
    hard_request.difficulty = Difficulty::Hard;
    let hard = catalog.create_recipe(&hard_request).await?;

    assert_eq!(ids(&catalog.find_by_difficulty(Difficulty::Easy).await?), vec![easy.id]);
    assert_eq!(ids(&catalog.find_by_difficulty(Difficulty::Hard).await?), vec![hard.id]);
    assert!(catalog.find_by_difficulty(Difficulty::Medium).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_values_beyond_u32_rejected_before_storage() -> Result<(), Box<dyn Error>> {
    let database = create_test_database().await?;
    let catalog = RecipeCatalog::new(database.clone());

    let mut request = sample_recipe("Slow Roast", &["beef", "salt"]);
    request.cooking_time = Some(5_000_000_000);
    if let Some(timer) = request.steps[1].timer.as_mut() {
        timer.duration_seconds = 5_000_000_000;
    }
    request.steps[0].order_number = 5_000_000_000;

    let err = catalog.create_recipe(&request).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    let violations = err.details["violations"].as_array().expect("violations");
    assert_eq!(violations.len(), 3);
    assert!(database.list_recipes().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_largest_storable_values_round_trip() -> Result<(), Box<dyn Error>> {
    let database = create_test_database().await?;
    let catalog = RecipeCatalog::new(database);

    let mut request = sample_recipe("Slow Roast", &["beef", "salt"]);
    request.cooking_time = Some(i64::from(u32::MAX));
    if let Some(timer) = request.steps[1].timer.as_mut() {
        timer.duration_seconds = i64::from(u32::MAX);
    }

    let created = catalog.create_recipe(&request).await?;
    assert_eq!(created.cooking_time, Some(u32::MAX));
    assert_eq!(
        created.steps[1].timer.as_ref().map(|t| t.duration_seconds),
        Some(u32::MAX)
    );
    Ok(())
}
