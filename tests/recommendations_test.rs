// ABOUTME: Integration tests for recipe recommendations
// ABOUTME: Recent ingredients feed the matcher, allergies exclude, preferences include
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::error::Error;

use common::{create_test_resources, create_test_recipe, create_test_user, ids};
use forkast_core::errors::ErrorCode;
use forkast_core::models::NewIngredient;
use forkast_server::resources::ServerResources;

async fn use_ingredients(
    resources: &ServerResources,
    email: &str,
    names: &[&str],
) -> Result<(), Box<dyn Error>> {
    for name in names {
        let ingredient = resources
            .ingredients
            .add_ingredient(
                email,
                &NewIngredient {
                    name: (*name).to_owned(),
                    category: None,
                    unit: None,
                },
            )
            .await?;
        resources.ingredients.record_use(email, ingredient.id).await?;
    }
    Ok(())
}

#[tokio::test]
async fn test_allergen_recipe_excluded_even_when_preferred() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;
    let database = &resources.database;
    let user = create_test_user(database, "cook@forkast.app").await?;
    let plain = create_test_recipe(database, "Seasoned Rice", &["salt", "pepper", "rice"]).await?;
    create_test_recipe(database, "Satay", &["salt", "pepper", "peanut"]).await?;

    use_ingredients(&resources, &user.email, &["salt", "pepper"]).await?;
    resources
        .users
        .set_preferences(&user.email, &["salt".to_owned()])
        .await?;
    resources
        .users
        .set_allergies(&user.email, &["peanut".to_owned()])
        .await?;

    let recommended = resources.recommendations.recommend(&user.email).await?;
    assert_eq!(ids(&recommended), vec![plain.id]);
    Ok(())
}

#[tokio::test]
async fn test_no_preferences_means_no_recommendations() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;
    let database = &resources.database;
    let user = create_test_user(database, "cook@forkast.app").await?;
    create_test_recipe(database, "Seasoned Rice", &["salt", "pepper", "rice"]).await?;

    use_ingredients(&resources, &user.email, &["salt", "pepper"]).await?;

    assert!(resources
        .recommendations
        .recommend(&user.email)
        .await?
        .is_empty());
    Ok(())
}

#[tokio::test]
async fn test_without_recent_ingredients_all_recipes_are_candidates() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;
    let database = &resources.database;
    let user = create_test_user(database, "cook@forkast.app").await?;
    let soup = create_test_recipe(database, "Basil Soup", &["basil", "tomato"]).await?;
    create_test_recipe(database, "Pancakes", &["flour", "egg"]).await?;

    resources
        .users
        .set_preferences(&user.email, &["basil".to_owned()])
        .await?;

    let recommended = resources.recommendations.recommend(&user.email).await?;
    assert_eq!(ids(&recommended), vec![soup.id]);
    Ok(())
}

#[tokio::test]
async fn test_candidates_limited_to_matched_recipes() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;
    let database = &resources.database;
    let user = create_test_user(database, "cook@forkast.app").await?;
    let matched = create_test_recipe(database, "Garlic Bread", &["garlic", "bread"]).await?;
    create_test_recipe(database, "Garlic Soup", &["garlic", "stock"]).await?;

    use_ingredients(&resources, &user.email, &["garlic", "bread"]).await?;
    resources
        .users
        .set_preferences(&user.email, &["garlic".to_owned()])
        .await?;

    let recommended = resources.recommendations.recommend(&user.email).await?;
    assert_eq!(ids(&recommended), vec![matched.id]);
    Ok(())
}

#[tokio::test]
async fn test_unknown_user_is_not_found() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;

    let err = resources
        .recommendations
        .recommend("ghost@forkast.app")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    Ok(())
}
