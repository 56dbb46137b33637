// ABOUTME: User authentication route handlers for registration and login
// ABOUTME: Validates credentials, hashes passwords, and issues session tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

//! Authentication routes
//!
//! `AuthService` holds the business logic so it can be exercised without
//! HTTP; `AuthRoutes` only maps requests onto it.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{Duration, Utc};
use forkast_core::constants::error_messages;
use forkast_core::errors::{AppError, AppResult, ErrorCode};
use forkast_core::models::User;
use forkast_core::validation::validate_credentials;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::logging::AppLogger;
use crate::resources::ServerResources;

/// Credentials posted to `/auth/register` and `/auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    /// Account email
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Public user info returned with a token
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    /// User id
    pub user_id: String,
    /// Account email
    pub email: String,
}

/// Response to a successful registration or login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// RFC 3339 token expiry
    pub expires_at: String,
    /// The authenticated user
    pub user: UserInfo,
}

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    resources: Arc<ServerResources>,
}

impl AuthService {
    /// Create the service over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Register a new account and sign it in
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed email or weak password, and
    /// `ResourceAlreadyExists` when the email is taken; nothing is written then
    pub async fn register(&self, request: CredentialsRequest) -> AppResult<AuthResponse> {
        let email = normalize_email(&request.email);
        validate_credentials(&email, &request.password)?;

        let database = &self.resources.database;
        if database.user_exists_by_email(&email).await? {
            AppLogger::log_auth_event(&email, "register", false, Some("email already registered"));
            return Err(AppError::new(
                ErrorCode::ResourceAlreadyExists,
                error_messages::EMAIL_ALREADY_REGISTERED,
            ));
        }

        let password_hash = self.resources.password_hasher.hash(&request.password).await?;
        let user = User::new(email, password_hash);
        database.create_user(&user).await?;

        AppLogger::log_auth_event(&user.email, "register", true, None);
        info!(user.id = %user.id, "User registered");
        self.issue(&user)
    }

    /// Sign in with existing credentials
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` with one message for an unknown email or a wrong password
    pub async fn login(&self, request: CredentialsRequest) -> AppResult<AuthResponse> {
        let email = normalize_email(&request.email);

        let Some(user) = self.resources.database.get_user_by_email(&email).await? else {
            AppLogger::log_auth_event(&email, "login", false, Some("unknown email"));
            return Err(AppError::auth_invalid(error_messages::INVALID_CREDENTIALS));
        };

        let valid = self
            .resources
            .password_hasher
            .verify(&request.password, &user.password_hash)
            .await?;
        if !valid {
            warn!(user.email = %email, "Invalid password");
            AppLogger::log_auth_event(&email, "login", false, Some("wrong password"));
            return Err(AppError::auth_invalid(error_messages::INVALID_CREDENTIALS));
        }

        AppLogger::log_auth_event(&email, "login", true, None);
        self.issue(&user)
    }

    fn issue(&self, user: &User) -> AppResult<AuthResponse> {
        let auth_manager = &self.resources.auth_manager;
        let token = auth_manager.generate_token(user)?;
        let expires_at = Utc::now() + Duration::hours(auth_manager.token_expiry_hours());

        Ok(AuthResponse {
            token,
            expires_at: expires_at.to_rfc3339(),
            user: UserInfo {
                user_id: user.id.to_string(),
                email: user.email.clone(),
            },
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create the `/auth` routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/register", post(Self::handle_register))
            .route("/auth/login", post(Self::handle_login))
            .with_state(resources)
    }

    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CredentialsRequest>,
    ) -> Result<Response, AppError> {
        let response = AuthService::new(resources).register(request).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CredentialsRequest>,
    ) -> Result<Response, AppError> {
        let response = AuthService::new(resources).login(request).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
