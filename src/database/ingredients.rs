// ABOUTME: Ingredient persistence for user pantries and the shared recipe catalog
// ABOUTME: Tracks usage counts and last-used times, and answers recent, frequent, and search queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use chrono::Utc;
use forkast_core::errors::{AppError, AppResult};
use forkast_core::models::{Ingredient, NewIngredient, NewRecipeIngredient};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use uuid::Uuid;

use super::users::touch_last_active;
use super::{format_timestamp, parse_timestamp, parse_uuid, to_u32, Database};

const INGREDIENT_COLUMNS: &str = "id, name, category, unit, user_id, last_used, usage_count";

impl Database {
    pub(super) async fn migrate_ingredients(&self) -> AppResult<()> {
        self.execute_schema(&[
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                category TEXT,
                unit TEXT,
                user_id TEXT REFERENCES users(id),
                last_used TEXT,
                usage_count INTEGER NOT NULL DEFAULT 0 CHECK (usage_count >= 0),
                created_at TEXT NOT NULL
            )
            ",
            // Catalog entries (no owner) are unique by name
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_ingredients_catalog_name
                ON ingredients(name) WHERE user_id IS NULL
            ",
            r"
            CREATE INDEX IF NOT EXISTS idx_ingredients_user_last_used
                ON ingredients(user_id, last_used)
            ",
        ])
        .await
    }

    /// Add an ingredient to a user's pantry
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn add_pantry_ingredient(
        &self,
        user_id: Uuid,
        request: &NewIngredient,
    ) -> AppResult<Ingredient> {
        let name = request.name.trim();
        let result = sqlx::query(
            r"
            INSERT INTO ingredients (name, category, unit, user_id, last_used, usage_count, created_at)
            VALUES ($1, $2, $3, $4, NULL, 0, $5)
            ",
        )
        .bind(name)
        .bind(&request.category)
        .bind(&request.unit)
        .bind(user_id.to_string())
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add ingredient: {e}")))?;

        Ok(Ingredient {
            id: result.last_insert_rowid(),
            name: name.to_owned(),
            category: request.category.clone(),
            unit: request.unit.clone(),
            user_id: Some(user_id),
            last_used: None,
            usage_count: 0,
        })
    }

    /// Get one of a user's pantry ingredients
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_pantry_ingredient(
        &self,
        user_id: Uuid,
        ingredient_id: i64,
    ) -> AppResult<Option<Ingredient>> {
        let sql = format!("SELECT {INGREDIENT_COLUMNS} FROM ingredients WHERE id = $1 AND user_id = $2");
        let row = sqlx::query(&sql)
            .bind(ingredient_id)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get ingredient: {e}")))?;

        row.map(|r| row_to_ingredient(&r)).transpose()
    }

    /// Record that a user cooked with one of their ingredients
    ///
    /// Increments the usage counter, stamps the last-used time, and refreshes
    /// the user's activity in one transaction. Returns `None` when the
    /// ingredient does not exist or belongs to someone else.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn record_ingredient_use(
        &self,
        user_id: Uuid,
        ingredient_id: i64,
    ) -> AppResult<Option<Ingredient>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let updated = sqlx::query(
            r"
            UPDATE ingredients
            SET usage_count = usage_count + 1, last_used = $1
            WHERE id = $2 AND user_id = $3
            ",
        )
        .bind(format_timestamp(Utc::now()))
        .bind(ingredient_id)
        .bind(user_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to record ingredient use: {e}")))?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        touch_last_active(&mut tx, user_id).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {e}")))?;

        self.get_pantry_ingredient(user_id, ingredient_id).await
    }

    /// All of a user's pantry ingredients, most recently used first
    ///
    /// Never-used ingredients come last, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_pantry_ingredients(&self, user_id: Uuid) -> AppResult<Vec<Ingredient>> {
        let sql = format!(
            r"
            SELECT {INGREDIENT_COLUMNS} FROM ingredients
            WHERE user_id = $1
            ORDER BY last_used IS NULL, last_used DESC, id
            "
        );
        self.fetch_ingredients(&sql, user_id, None, "list ingredients")
            .await
    }

    /// A user's used ingredients, newest use first, capped at `limit`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn recent_ingredients(&self, user_id: Uuid, limit: u32) -> AppResult<Vec<Ingredient>> {
        let sql = format!(
            r"
            SELECT {INGREDIENT_COLUMNS} FROM ingredients
            WHERE user_id = $1 AND last_used IS NOT NULL
            ORDER BY last_used DESC, id DESC
            LIMIT $2
            "
        );
        self.fetch_ingredients(&sql, user_id, Some(limit), "get recent ingredients")
            .await
    }

    /// A user's ingredients by descending usage count
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn most_used_ingredients(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> AppResult<Vec<Ingredient>> {
        let sql = format!(
            r"
            SELECT {INGREDIENT_COLUMNS} FROM ingredients
            WHERE user_id = $1
            ORDER BY usage_count DESC, name
            LIMIT $2
            "
        );
        self.fetch_ingredients(&sql, user_id, Some(limit), "get frequent ingredients")
            .await
    }

    /// A user's ingredients whose name contains `term` (ASCII case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn search_ingredients(&self, user_id: Uuid, term: &str) -> AppResult<Vec<Ingredient>> {
        let pattern = format!("%{}%", escape_like(term.trim()));
        let sql = format!(
            r"
            SELECT {INGREDIENT_COLUMNS} FROM ingredients
            WHERE user_id = $1 AND name LIKE $2 ESCAPE '\'
            ORDER BY name, id
            "
        );
        let rows = sqlx::query(&sql)
            .bind(user_id.to_string())
            .bind(pattern)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to search ingredients: {e}")))?;

        rows.iter().map(row_to_ingredient).collect()
    }

    async fn fetch_ingredients(
        &self,
        sql: &str,
        user_id: Uuid,
        limit: Option<u32>,
        action: &str,
    ) -> AppResult<Vec<Ingredient>> {
        let mut query = sqlx::query(sql).bind(user_id.to_string());
        if let Some(limit) = limit {
            query = query.bind(i64::from(limit));
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to {action}: {e}")))?;

        rows.iter().map(row_to_ingredient).collect()
    }
}

/// Resolve a catalog ingredient by name, creating it on first use
pub(super) async fn find_or_create_catalog_ingredient(
    conn: &mut SqliteConnection,
    ingredient: &NewRecipeIngredient,
) -> AppResult<i64> {
    let name = ingredient.name.trim();
    let existing = sqlx::query("SELECT id FROM ingredients WHERE user_id IS NULL AND name = $1")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to look up ingredient: {e}")))?;

    if let Some(row) = existing {
        return Ok(row.get("id"));
    }

    let result = sqlx::query(
        r"
        INSERT INTO ingredients (name, category, unit, user_id, last_used, usage_count, created_at)
        VALUES ($1, $2, $3, NULL, NULL, 0, $4)
        ",
    )
    .bind(name)
    .bind(&ingredient.category)
    .bind(&ingredient.unit)
    .bind(format_timestamp(Utc::now()))
    .execute(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to create catalog ingredient: {e}")))?;

    Ok(result.last_insert_rowid())
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn row_to_ingredient(row: &SqliteRow) -> AppResult<Ingredient> {
    let user_id: Option<String> = row.get("user_id");
    let last_used: Option<String> = row.get("last_used");
    let usage_count: i64 = row.get("usage_count");

    Ok(Ingredient {
        id: row.get("id"),
        name: row.get("name"),
        category: row.get("category"),
        unit: row.get("unit"),
        user_id: user_id.as_deref().map(parse_uuid).transpose()?,
        last_used: last_used.as_deref().map(parse_timestamp).transpose()?,
        usage_count: to_u32(usage_count)?,
    })
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("salt"), "salt");
    }
}
