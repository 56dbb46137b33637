// ABOUTME: Main library entry point for the Forkast recipe server
// ABOUTME: Ingredient matching, bookmarks, recommendations, and auth over a REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

#![deny(unsafe_code)]

//! # Forkast Server
//!
//! A recipe discovery backend. Users register, log in, keep a pantry of
//! ingredients, search recipes by ingredient overlap, bookmark recipes, and
//! get recommendations built from what they cooked with recently, filtered
//! by allergies and preferences.
//!
//! ## Architecture
//!
//! - **Core** (`forkast-core`): error type, models, validation, constants
//! - **Database**: SQLite through sqlx, one module per table group
//! - **Services**: matching, bookmarks, recommendations, recipes, pantry, profiles
//! - **Routes**: axum routers per domain, assembled in [`server`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use forkast_server::config::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     forkast_server::server::run(config).await
//! }
//! ```

/// JWT issuance and validation, bcrypt password hashing
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// SQLite persistence
pub mod database;

/// Structured logging setup
pub mod logging;

/// Request id, CORS, and bearer authentication middleware
pub mod middleware;

/// Shared handles wired at startup
pub mod resources;

/// REST route handlers
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;

/// Domain services
pub mod services;

pub use forkast_core::errors;
pub use forkast_core::models;
