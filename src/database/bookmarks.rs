// ABOUTME: Bookmark relation between users and recipes
// ABOUTME: Idempotent add and remove in one transaction each, plus bookmark listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use std::collections::BTreeSet;

use chrono::Utc;
use forkast_core::errors::{AppError, AppResult};
use forkast_core::models::Recipe;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use super::recipes::RECIPE_COLUMNS;
use super::users::touch_last_active;
use super::{format_timestamp, parse_uuid, Database};

/// Direction of a bookmark mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkChange {
    /// Put the recipe in the user's bookmark set
    Add,
    /// Take the recipe out of the user's bookmark set
    Remove,
}

impl BookmarkChange {
    /// Label used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "bookmark",
            Self::Remove => "unbookmark",
        }
    }
}

impl Database {
    pub(super) async fn migrate_bookmarks(&self) -> AppResult<()> {
        self.execute_schema(&[
            r"
            CREATE TABLE IF NOT EXISTS user_bookmarks (
                user_id TEXT NOT NULL REFERENCES users(id),
                recipe_id INTEGER NOT NULL REFERENCES recipes(id),
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, recipe_id)
            )
            ",
            r"
            CREATE INDEX IF NOT EXISTS idx_user_bookmarks_recipe
                ON user_bookmarks(recipe_id)
            ",
        ])
        .await
    }

    /// Add or remove a bookmark for the user with `email`
    ///
    /// Resolves the user, then the recipe, then writes, all inside one
    /// transaction that also refreshes the user's activity time. Adding an
    /// existing bookmark and removing a missing one both succeed without
    /// changing anything. Returns whether the bookmark set changed.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user or recipe, or a database error
    pub async fn change_bookmark(
        &self,
        email: &str,
        recipe_id: i64,
        change: BookmarkChange,
    ) -> AppResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let user_id = resolve_user_id(&mut tx, email).await?;
        ensure_recipe_exists(&mut tx, recipe_id).await?;

        let result = match change {
            BookmarkChange::Add => sqlx::query(
                r"
                INSERT OR IGNORE INTO user_bookmarks (user_id, recipe_id, created_at)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(user_id.to_string())
            .bind(recipe_id)
            .bind(format_timestamp(Utc::now()))
            .execute(&mut *tx)
            .await,
            BookmarkChange::Remove => {
                sqlx::query("DELETE FROM user_bookmarks WHERE user_id = $1 AND recipe_id = $2")
                    .bind(user_id.to_string())
                    .bind(recipe_id)
                    .execute(&mut *tx)
                    .await
            }
        }
        .map_err(|e| {
            AppError::database(format!("Failed to {} recipe: {e}", change.as_str()))
        })?;

        touch_last_active(&mut tx, user_id).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// A user's bookmarked recipes in ascending recipe id order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn bookmarked_recipes(&self, user_id: Uuid) -> AppResult<Vec<Recipe>> {
        let sql = format!(
            r"
            SELECT {RECIPE_COLUMNS}
            FROM recipes r
            JOIN user_bookmarks ub ON ub.recipe_id = r.id
            WHERE ub.user_id = $1
            ORDER BY r.id
            "
        );
        let rows = sqlx::query(&sql)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list bookmarks: {e}")))?;

        self.hydrate_recipes(&rows).await
    }

    /// Ids of a user's bookmarked recipes
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn bookmarked_recipe_ids(&self, user_id: Uuid) -> AppResult<BTreeSet<i64>> {
        let rows = sqlx::query("SELECT recipe_id FROM user_bookmarks WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list bookmark ids: {e}")))?;

        Ok(rows.iter().map(|row| row.get("recipe_id")).collect())
    }
}

async fn resolve_user_id(conn: &mut SqliteConnection, email: &str) -> AppResult<Uuid> {
    let row = sqlx::query("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?
        .ok_or_else(|| AppError::not_found(format!("User {email}")))?;

    let id: String = row.get("id");
    parse_uuid(&id)
}

async fn ensure_recipe_exists(conn: &mut SqliteConnection, recipe_id: i64) -> AppResult<()> {
    sqlx::query("SELECT id FROM recipes WHERE id = $1")
        .bind(recipe_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))
}
