// ABOUTME: User account and taste-profile persistence
// ABOUTME: Stores credentials, activity timestamps, and preference and allergy tag sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use std::collections::BTreeSet;

use chrono::Utc;
use forkast_core::constants::error_messages;
use forkast_core::errors::{AppError, AppResult, ErrorCode};
use forkast_core::models::User;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, parse_uuid, Database};

/// Which tag set of a user to read or replace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Ingredient names the user likes
    Preference,
    /// Ingredient names the user must avoid
    Allergy,
}

impl TagKind {
    const fn table(self) -> &'static str {
        match self {
            Self::Preference => "user_preferences",
            Self::Allergy => "user_allergies",
        }
    }

    /// Label used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preference => "preferences",
            Self::Allergy => "allergies",
        }
    }
}

impl Database {
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        self.execute_schema(&[
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL,
                last_active TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS user_preferences (
                user_id TEXT NOT NULL REFERENCES users(id),
                tag TEXT NOT NULL,
                PRIMARY KEY (user_id, tag)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS user_allergies (
                user_id TEXT NOT NULL REFERENCES users(id),
                tag TEXT NOT NULL,
                PRIMARY KEY (user_id, tag)
            )
            ",
        ])
        .await
    }

    /// Insert a new user
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the email is taken, or a database error
    pub async fn create_user(&self, user: &User) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, password_hash, created_at, last_active)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(format_timestamp(user.created_at))
        .bind(format_timestamp(user.last_active))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation());
            if duplicate {
                AppError::new(
                    ErrorCode::ResourceAlreadyExists,
                    error_messages::EMAIL_ALREADY_REGISTERED,
                )
                .with_source(e)
            } else {
                AppError::database(format!("Failed to create user: {e}"))
            }
        })?;
        Ok(())
    }

    /// Look up a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, email, password_hash, created_at, last_active
            FROM users WHERE id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Look up a user by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, email, password_hash, created_at, last_active
            FROM users WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Look up a user by email, failing when absent
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no user has this email
    pub async fn require_user_by_email(&self, email: &str) -> AppResult<User> {
        self.get_user_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {email}")))
    }

    /// Whether an account exists for this email
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn user_exists_by_email(&self, email: &str) -> AppResult<bool> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check user email: {e}")))?;
        let count: i64 = row.get("count");
        Ok(count > 0)
    }

    /// Count registered users
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_users(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count users: {e}")))?;
        Ok(row.get("count"))
    }

    /// Read one of a user's tag sets
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_tags(&self, user_id: Uuid, kind: TagKind) -> AppResult<BTreeSet<String>> {
        let sql = format!("SELECT tag FROM {} WHERE user_id = $1 ORDER BY tag", kind.table());
        let rows = sqlx::query(&sql)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to get user {}: {e}", kind.as_str()))
            })?;

        Ok(rows.iter().map(|row| row.get("tag")).collect())
    }

    /// Replace one of a user's tag sets in a single transaction
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is written in that case
    pub async fn replace_user_tags(
        &self,
        user_id: Uuid,
        kind: TagKind,
        tags: &BTreeSet<String>,
    ) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let delete_sql = format!("DELETE FROM {} WHERE user_id = $1", kind.table());
        sqlx::query(&delete_sql)
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to clear user {}: {e}", kind.as_str()))
            })?;

        let insert_sql = format!("INSERT INTO {} (user_id, tag) VALUES ($1, $2)", kind.table());
        for tag in tags {
            sqlx::query(&insert_sql)
                .bind(user_id.to_string())
                .bind(tag)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::database(format!("Failed to store user {}: {e}", kind.as_str()))
                })?;
        }

        touch_last_active(&mut tx, user_id).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {e}")))?;
        Ok(())
    }
}

/// Refresh a user's last-active timestamp inside an open transaction
pub(super) async fn touch_last_active(conn: &mut SqliteConnection, user_id: Uuid) -> AppResult<()> {
    sqlx::query("UPDATE users SET last_active = $1 WHERE id = $2")
        .bind(format_timestamp(Utc::now()))
        .bind(user_id.to_string())
        .execute(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to update last active time: {e}")))?;
    Ok(())
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id: String = row.get("id");
    let created_at: String = row.get("created_at");
    let last_active: String = row.get("last_active");

    Ok(User {
        id: parse_uuid(&id)?,
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: parse_timestamp(&created_at)?,
        last_active: parse_timestamp(&last_active)?,
    })
}
