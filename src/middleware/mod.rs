// ABOUTME: HTTP middleware for authentication, CORS, and request ids
// ABOUTME: Bearer token checks, cross-origin policy, and request id propagation for structured logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

/// Bearer token authentication
pub mod auth;
/// Cross-origin resource sharing policy
pub mod cors;
/// Request id generation and propagation
pub mod request_id;

pub use auth::{authenticate_headers, AuthenticatedUser};
pub use cors::setup_cors;
pub use request_id::{request_id_middleware, RequestId};
