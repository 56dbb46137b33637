// ABOUTME: Integration tests for ingredient-overlap recipe matching
// ABOUTME: Covers the two-ingredient threshold, empty queries, and result ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::BTreeSet;
use std::error::Error;

use common::{create_test_database, create_test_recipe, ids};
use forkast_server::services::MatchingEngine;

fn names(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

#[tokio::test]
async fn test_recipe_needs_two_matching_ingredients() -> Result<(), Box<dyn Error>> {
    let database = create_test_database().await?;
    let soup = create_test_recipe(&database, "Pepper Soup", &["salt", "pepper", "garlic"]).await?;
    create_test_recipe(&database, "Sweet Brine", &["salt", "sugar"]).await?;
    create_test_recipe(&database, "Pancakes", &["flour", "egg"]).await?;

    let matcher = MatchingEngine::new(database);
    let found = matcher.find_by_ingredients(&names(&["salt", "pepper"])).await?;

    assert_eq!(ids(&found), vec![soup.id]);
    Ok(())
}

#[tokio::test]
async fn test_all_qualifying_recipes_returned_in_id_order() -> Result<(), Box<dyn Error>> {
    let database = create_test_database().await?;
    let soup = create_test_recipe(&database, "Pepper Soup", &["salt", "pepper", "garlic"]).await?;
    let brine = create_test_recipe(&database, "Sweet Brine", &["salt", "sugar"]).await?;
    create_test_recipe(&database, "Pancakes", &["flour", "egg"]).await?;

    let matcher = MatchingEngine::new(database);
    let found = matcher
        .find_by_ingredients(&names(&["sugar", "pepper", "salt"]))
        .await?;

    assert_eq!(ids(&found), vec![soup.id, brine.id]);
    Ok(())
}

#[tokio::test]
async fn test_single_ingredient_query_matches_nothing() -> Result<(), Box<dyn Error>> {
    let database = create_test_database().await?;
    create_test_recipe(&database, "Pepper Soup", &["salt", "pepper"]).await?;

    let matcher = MatchingEngine::new(database);
    assert!(matcher.find_by_ingredients(&names(&["salt"])).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_empty_query_returns_every_recipe() -> Result<(), Box<dyn Error>> {
    let database = create_test_database().await?;
    let first = create_test_recipe(&database, "Pepper Soup", &["salt", "pepper"]).await?;
    let second = create_test_recipe(&database, "Pancakes", &["flour", "egg"]).await?;

    let matcher = MatchingEngine::new(database);
    let found = matcher.find_by_ingredients(&BTreeSet::new()).await?;

    assert_eq!(ids(&found), vec![first.id, second.id]);
    Ok(())
}

#[tokio::test]
async fn test_repeated_recipe_ingredient_counts_once() -> Result<(), Box<dyn Error>> {
    let database = create_test_database().await?;
    create_test_recipe(&database, "Salty Water", &["salt", "salt", "water"]).await?;

    let matcher = MatchingEngine::new(database);
    let found = matcher.find_by_ingredients(&names(&["salt", "pepper"])).await?;

    assert!(found.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_matched_recipes_are_fully_hydrated() -> Result<(), Box<dyn Error>> {
    let database = create_test_database().await?;
    create_test_recipe(&database, "Pepper Soup", &["salt", "pepper", "garlic"]).await?;

    let matcher = MatchingEngine::new(database);
    let found = matcher.find_by_ingredients(&names(&["garlic", "pepper"])).await?;

    let recipe = found.first().expect("one match");
    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.steps.len(), 2);
    assert!(recipe.steps[1].timer.is_some());
    Ok(())
}
