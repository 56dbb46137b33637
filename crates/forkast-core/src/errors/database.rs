// ABOUTME: sqlx error conversion for AppError
// ABOUTME: Classifies missing rows and unique-constraint violations before falling back to DATABASE_ERROR
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use super::{AppError, ErrorCode};

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::RowNotFound => Self::not_found("Record"),
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                Self::new(ErrorCode::ResourceAlreadyExists, db_error.message().to_owned())
            }
            _ => Self::new(
                ErrorCode::DatabaseError,
                format!("Database operation failed: {error}"),
            ),
        }
        .with_source(error)
    }
}
