// ABOUTME: SQLite persistence for users, recipes, ingredients, and bookmarks
// ABOUTME: Owns the connection pool, applies the schema, and hosts per-domain query modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

//! # Database Management
//!
//! A single [`Database`] wraps the sqlx pool. Each domain adds its queries in
//! its own `impl Database` block:
//!
//! - `users`: accounts, preference and allergy tags
//! - `ingredients`: pantry and catalog ingredients with usage tracking
//! - `recipes`: recipes with steps, timers, and the ingredient matcher
//! - `bookmarks`: the user/recipe bookmark relation
//!
//! Foreign keys are enforced on every connection. Deletions never rely on
//! cascades; the owning operation removes dependent rows itself.

mod bookmarks;
mod ingredients;
mod recipes;
mod users;

pub use bookmarks::BookmarkChange;
pub use users::TagKind;

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use forkast_core::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::DatabaseUrl;

/// Connection ceiling for file-backed databases
const MAX_FILE_CONNECTIONS: u32 = 8;

/// Database manager for all persistent state
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database and apply the schema
    ///
    /// In-memory databases live inside a single pooled connection that is
    /// never recycled, so every query observes the same data.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be opened or a migration fails
    pub async fn new(url: &DatabaseUrl) -> AppResult<Self> {
        if let DatabaseUrl::SQLite { path } = url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::database(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let connection_string = url.to_connection_string();
        let options = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|e| AppError::database(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(MAX_FILE_CONNECTIONS)
                .acquire_timeout(Duration::from_secs(10))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        info!("Connected to database at {connection_string}");

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the connection pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply the schema; safe to run repeatedly
    ///
    /// # Errors
    ///
    /// Returns an error if any `CREATE` statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_ingredients().await?;
        self.migrate_recipes().await?;
        self.migrate_bookmarks().await?;
        debug!("Database schema is up to date");
        Ok(())
    }

    /// Check that the store answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if the probe query fails
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database health check failed: {e}")))?;
        Ok(())
    }

    /// Run a list of DDL statements
    async fn execute_schema(&self, statements: &[&str]) -> AppResult<()> {
        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
        }
        Ok(())
    }
}

/// Render a timestamp for storage
///
/// Fixed microsecond precision keeps the text columns ordered by time.
pub(crate) fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse an RFC 3339 timestamp column
pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid timestamp '{value}': {e}")))
}

/// Parse a UUID column
pub(crate) fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))
}

/// Convert a non-negative counter column
pub(crate) fn to_u32(value: i64) -> AppResult<u32> {
    u32::try_from(value)
        .map_err(|_| AppError::internal(format!("Stored value {value} is out of range")))
}
