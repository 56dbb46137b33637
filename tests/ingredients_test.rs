// ABOUTME: Integration tests for pantry ingredients and usage tracking
// ABOUTME: Covers recent ordering, usage counts, search, and ownership checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::error::Error;

use common::{create_test_resources, create_test_user};
use forkast_core::errors::ErrorCode;
use forkast_core::models::{Ingredient, NewIngredient};
use forkast_server::resources::ServerResources;

async fn add(
    resources: &ServerResources,
    email: &str,
    name: &str,
) -> Result<Ingredient, Box<dyn Error>> {
    Ok(resources
        .ingredients
        .add_ingredient(
            email,
            &NewIngredient {
                name: name.to_owned(),
                category: Some("pantry".to_owned()),
                unit: None,
            },
        )
        .await?)
}

fn names(ingredients: &[Ingredient]) -> Vec<&str> {
    ingredients.iter().map(|i| i.name.as_str()).collect()
}

#[tokio::test]
async fn test_record_use_moves_ingredient_to_front() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;
    let user = create_test_user(&resources.database, "cook@forkast.app").await?;
    let salt = add(&resources, &user.email, "salt").await?;
    let pepper = add(&resources, &user.email, "pepper").await?;

    resources.ingredients.record_use(&user.email, salt.id).await?;
    resources.ingredients.record_use(&user.email, pepper.id).await?;
    assert_eq!(
        names(&resources.ingredients.recent(&user.email).await?),
        vec!["pepper", "salt"]
    );

    let salt = resources.ingredients.record_use(&user.email, salt.id).await?;
    assert_eq!(salt.usage_count, 2);
    assert!(salt.last_used.is_some());
    assert_eq!(
        names(&resources.ingredients.recent(&user.email).await?),
        vec!["salt", "pepper"]
    );
    Ok(())
}

#[tokio::test]
async fn test_unused_ingredients_are_not_recent() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;
    let user = create_test_user(&resources.database, "cook@forkast.app").await?;
    add(&resources, &user.email, "saffron").await?;

    assert!(resources.ingredients.recent(&user.email).await?.is_empty());
    assert_eq!(
        names(&resources.ingredients.list(&user.email).await?),
        vec!["saffron"]
    );
    Ok(())
}

#[tokio::test]
async fn test_most_used_orders_by_usage_count() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;
    let user = create_test_user(&resources.database, "cook@forkast.app").await?;
    let salt = add(&resources, &user.email, "salt").await?;
    let oil = add(&resources, &user.email, "oil").await?;

    for _ in 0..3 {
        resources.ingredients.record_use(&user.email, oil.id).await?;
    }
    resources.ingredients.record_use(&user.email, salt.id).await?;

    assert_eq!(
        names(&resources.ingredients.most_used(&user.email).await?),
        vec!["oil", "salt"]
    );
    Ok(())
}

#[tokio::test]
async fn test_search_matches_substring() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;
    let user = create_test_user(&resources.database, "cook@forkast.app").await?;
    add(&resources, &user.email, "red pepper").await?;
    add(&resources, &user.email, "black pepper").await?;
    add(&resources, &user.email, "salt").await?;

    let found = resources.ingredients.search(&user.email, "pepper").await?;
    assert_eq!(names(&found), vec!["black pepper", "red pepper"]);

    let err = resources
        .ingredients
        .search(&user.email, "   ")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_cannot_use_someone_elses_ingredient() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;
    let alice = create_test_user(&resources.database, "alice@forkast.app").await?;
    let bob = create_test_user(&resources.database, "bob@forkast.app").await?;
    let salt = add(&resources, &alice.email, "salt").await?;

    let err = resources
        .ingredients
        .record_use(&bob.email, salt.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_blank_ingredient_name_rejected() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;
    let user = create_test_user(&resources.database, "cook@forkast.app").await?;

    let err = resources
        .ingredients
        .add_ingredient(
            &user.email,
            &NewIngredient {
                name: "  ".to_owned(),
                category: None,
                unit: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.code.is_client_error());
    assert!(resources.ingredients.list(&user.email).await?.is_empty());
    Ok(())
}
