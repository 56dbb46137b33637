// ABOUTME: Recipe persistence with steps, timers, and ingredient links
// ABOUTME: Implements the ingredient-overlap matcher plus transactional create and delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use forkast_core::errors::{AppError, AppResult};
use forkast_core::models::{Difficulty, NewRecipe, Recipe, RecipeIngredient, Step, Timer};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite};
use tracing::debug;

use super::ingredients::find_or_create_catalog_ingredient;
use super::{format_timestamp, parse_timestamp, to_u32, Database};

/// Recipe header columns; expects the `recipes` table aliased as `r`
pub(super) const RECIPE_COLUMNS: &str = r"
    r.id, r.name, r.description, r.image_url, r.preparation_time, r.cooking_time,
    r.servings, r.difficulty, r.created_at,
    (SELECT COUNT(*) FROM user_bookmarks b WHERE b.recipe_id = r.id) AS bookmark_count
";

impl Database {
    pub(super) async fn migrate_recipes(&self) -> AppResult<()> {
        self.execute_schema(&[
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT,
                image_url TEXT NOT NULL,
                preparation_time INTEGER CHECK (preparation_time > 0),
                cooking_time INTEGER CHECK (cooking_time > 0),
                servings INTEGER CHECK (servings > 0),
                difficulty TEXT NOT NULL CHECK (difficulty IN ('EASY', 'MEDIUM', 'HARD')),
                created_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS timers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                duration_seconds INTEGER NOT NULL CHECK (duration_seconds > 0),
                description TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS steps (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id),
                order_number INTEGER NOT NULL CHECK (order_number > 0),
                description TEXT NOT NULL,
                image_url TEXT,
                timer_id INTEGER UNIQUE REFERENCES timers(id),
                UNIQUE (recipe_id, order_number)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                recipe_id INTEGER NOT NULL REFERENCES recipes(id),
                ingredient_id INTEGER NOT NULL REFERENCES ingredients(id),
                position INTEGER NOT NULL,
                PRIMARY KEY (recipe_id, ingredient_id)
            )
            ",
            r"
            CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_ingredient
                ON recipe_ingredients(ingredient_id)
            ",
            "CREATE INDEX IF NOT EXISTS idx_recipes_difficulty ON recipes(difficulty)",
        ])
        .await
    }

    /// Every recipe in ascending id order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_recipes(&self) -> AppResult<Vec<Recipe>> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes r ORDER BY r.id");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        self.hydrate_recipes(&rows).await
    }

    /// Look up a recipe by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_recipe(&self, recipe_id: i64) -> AppResult<Option<Recipe>> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.id = $1");
        let row = sqlx::query(&sql)
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        match row {
            Some(row) => Ok(self.hydrate_recipes(&[row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Recipes sharing at least `min_matches` distinct ingredient names with `names`
    ///
    /// Results are in ascending recipe id order. An empty `names` set matches
    /// nothing here; callers decide what an empty search means.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn find_recipes_by_ingredient_names(
        &self,
        names: &BTreeSet<String>,
        min_matches: i64,
    ) -> AppResult<Vec<Recipe>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            r"
            SELECT {RECIPE_COLUMNS}
            FROM recipes r
            JOIN recipe_ingredients ri ON ri.recipe_id = r.id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE i.name IN (
            "
        ));
        let mut separated = builder.separated(", ");
        for name in names {
            separated.push_bind(name.as_str());
        }
        separated.push_unseparated(") GROUP BY r.id HAVING COUNT(DISTINCT i.name) >= ");
        builder.push_bind(min_matches);
        builder.push(" ORDER BY r.id");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to match recipes: {e}")))?;

        debug!(
            requested = names.len(),
            matched = rows.len(),
            "Matched recipes by ingredient overlap"
        );
        self.hydrate_recipes(&rows).await
    }

    /// Recipes of one difficulty in ascending id order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn find_recipes_by_difficulty(&self, difficulty: Difficulty) -> AppResult<Vec<Recipe>> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.difficulty = $1 ORDER BY r.id");
        let rows = sqlx::query(&sql)
            .bind(difficulty.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to filter recipes: {e}")))?;

        self.hydrate_recipes(&rows).await
    }

    /// Insert a validated recipe with its steps, timers, and ingredient links
    ///
    /// Catalog ingredients are looked up by name and created when missing.
    /// Everything is written in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is written in that case
    pub async fn create_recipe(&self, request: &NewRecipe) -> AppResult<Recipe> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let result = sqlx::query(
            r"
            INSERT INTO recipes (
                name, description, image_url, preparation_time, cooking_time,
                servings, difficulty, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(request.name.trim())
        .bind(&request.description)
        .bind(request.image_url.trim())
        .bind(request.preparation_time)
        .bind(request.cooking_time)
        .bind(request.servings)
        .bind(request.difficulty.as_str())
        .bind(format_timestamp(Utc::now()))
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?;
        let recipe_id = result.last_insert_rowid();

        for (position, ingredient) in request.ingredients.iter().enumerate() {
            let ingredient_id = find_or_create_catalog_ingredient(&mut tx, ingredient).await?;
            sqlx::query(
                r"
                INSERT OR IGNORE INTO recipe_ingredients (recipe_id, ingredient_id, position)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(recipe_id)
            .bind(ingredient_id)
            .bind(i64::try_from(position).unwrap_or(i64::MAX))
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to link recipe ingredient: {e}")))?;
        }

        for step in &request.steps {
            let timer_id = match &step.timer {
                Some(timer) => {
                    let inserted = sqlx::query(
                        "INSERT INTO timers (duration_seconds, description) VALUES ($1, $2)",
                    )
                    .bind(timer.duration_seconds)
                    .bind(timer.description.trim())
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| AppError::database(format!("Failed to create timer: {e}")))?;
                    Some(inserted.last_insert_rowid())
                }
                None => None,
            };

            sqlx::query(
                r"
                INSERT INTO steps (recipe_id, order_number, description, image_url, timer_id)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(recipe_id)
            .bind(step.order_number)
            .bind(step.description.trim())
            .bind(&step.image_url)
            .bind(timer_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to create step: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {e}")))?;

        self.get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Recipe {recipe_id} vanished after insert")))
    }

    /// Delete a recipe and everything that hangs off it
    ///
    /// Bookmarks, ingredient links, steps, and their timers are removed
    /// explicitly before the recipe row, in one transaction. Catalog
    /// ingredients are kept. Returns `false` if the recipe did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is deleted in that case
    pub async fn delete_recipe(&self, recipe_id: i64) -> AppResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let exists = sqlx::query("SELECT id FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;
        if exists.is_none() {
            return Ok(false);
        }

        let timer_rows =
            sqlx::query("SELECT timer_id FROM steps WHERE recipe_id = $1 AND timer_id IS NOT NULL")
                .bind(recipe_id)
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to list step timers: {e}")))?;
        let timer_ids: Vec<i64> = timer_rows.iter().map(|row| row.get("timer_id")).collect();

        for (statement, what) in [
            ("DELETE FROM user_bookmarks WHERE recipe_id = $1", "bookmarks"),
            ("DELETE FROM recipe_ingredients WHERE recipe_id = $1", "ingredient links"),
            ("DELETE FROM steps WHERE recipe_id = $1", "steps"),
        ] {
            sqlx::query(statement)
                .bind(recipe_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to delete recipe {what}: {e}")))?;
        }

        for timer_id in timer_ids {
            sqlx::query("DELETE FROM timers WHERE id = $1")
                .bind(timer_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to delete timer: {e}")))?;
        }

        sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {e}")))?;
        Ok(true)
    }

    /// Count timers in the store
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_timers(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM timers")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count timers: {e}")))?;
        Ok(row.get("count"))
    }

    /// Attach ingredients and steps to recipe header rows, preserving row order
    pub(super) async fn hydrate_recipes(&self, rows: &[SqliteRow]) -> AppResult<Vec<Recipe>> {
        let mut recipes = rows
            .iter()
            .map(row_to_recipe_header)
            .collect::<AppResult<Vec<_>>>()?;
        if recipes.is_empty() {
            return Ok(recipes);
        }

        let index: HashMap<i64, usize> = recipes
            .iter()
            .enumerate()
            .map(|(i, recipe)| (recipe.id, i))
            .collect();

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r"
            SELECT ri.recipe_id, i.id, i.name, i.category, i.unit
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id IN (
            ",
        );
        push_id_list(&mut builder, &recipes);
        builder.push(") ORDER BY ri.recipe_id, ri.position");
        let ingredient_rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load recipe ingredients: {e}")))?;

        for row in &ingredient_rows {
            let recipe_id: i64 = row.get("recipe_id");
            if let Some(&i) = index.get(&recipe_id) {
                recipes[i].ingredients.push(RecipeIngredient {
                    id: row.get("id"),
                    name: row.get("name"),
                    category: row.get("category"),
                    unit: row.get("unit"),
                });
            }
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r"
            SELECT s.recipe_id, s.id, s.order_number, s.description, s.image_url,
                   t.id AS timer_id, t.duration_seconds, t.description AS timer_description
            FROM steps s
            LEFT JOIN timers t ON t.id = s.timer_id
            WHERE s.recipe_id IN (
            ",
        );
        push_id_list(&mut builder, &recipes);
        builder.push(") ORDER BY s.recipe_id, s.order_number");
        let step_rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load recipe steps: {e}")))?;

        for row in &step_rows {
            let recipe_id: i64 = row.get("recipe_id");
            if let Some(&i) = index.get(&recipe_id) {
                recipes[i].steps.push(row_to_step(row)?);
            }
        }

        Ok(recipes)
    }
}

fn push_id_list(builder: &mut QueryBuilder<'_, Sqlite>, recipes: &[Recipe]) {
    let mut separated = builder.separated(", ");
    for recipe in recipes {
        separated.push_bind(recipe.id);
    }
}

fn row_to_recipe_header(row: &SqliteRow) -> AppResult<Recipe> {
    let difficulty: String = row.get("difficulty");
    let created_at: String = row.get("created_at");
    let preparation_time: Option<i64> = row.get("preparation_time");
    let cooking_time: Option<i64> = row.get("cooking_time");
    let servings: Option<i64> = row.get("servings");
    let bookmark_count: i64 = row.get("bookmark_count");

    Ok(Recipe {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        image_url: row.get("image_url"),
        ingredients: Vec::new(),
        steps: Vec::new(),
        preparation_time: preparation_time.map(to_u32).transpose()?,
        cooking_time: cooking_time.map(to_u32).transpose()?,
        servings: servings.map(to_u32).transpose()?,
        difficulty: difficulty.parse()?,
        bookmark_count: to_u32(bookmark_count)?,
        created_at: parse_timestamp(&created_at)?,
    })
}

fn row_to_step(row: &SqliteRow) -> AppResult<Step> {
    let order_number: i64 = row.get("order_number");
    let timer_id: Option<i64> = row.get("timer_id");
    let timer = timer_id
        .map(|id| {
            let duration_seconds: i64 = row.get("duration_seconds");
            to_u32(duration_seconds).map(|duration_seconds| Timer {
                id,
                duration_seconds,
                description: row.get("timer_description"),
            })
        })
        .transpose()?;

    Ok(Step {
        id: row.get("id"),
        order_number: to_u32(order_number)?,
        description: row.get("description"),
        image_url: row.get("image_url"),
        timer,
    })
}
