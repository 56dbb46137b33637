// ABOUTME: Core types and constants for the Forkast recipe discovery service
// ABOUTME: Foundation crate with error handling, domain models, field validation, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

#![deny(unsafe_code)]

//! # Forkast Core
//!
//! Foundation crate providing shared types and constants for the Forkast
//! recipe service. It carries no storage or transport code so the server
//! crate and its tests can depend on it without pulling in the HTTP stack.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **models**: Users, recipes, steps, timers, and ingredients
//! - **validation**: Boundary checks for registration and recipe payloads
//! - **constants**: Application-wide constants organized by domain

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Domain models shared by the stores, services, and routes
pub mod models;

/// Field validation applied at the request boundary
pub mod validation;

/// Application constants organized by domain
pub mod constants;
