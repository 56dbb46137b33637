// ABOUTME: Bearer token authentication for protected routes
// ABOUTME: Extracts the Authorization header and validates the session token into a caller identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use forkast_core::constants::error_messages;
use forkast_core::errors::{AppError, AppResult};
use http::header::AUTHORIZATION;
use http::HeaderMap;
use uuid::Uuid;

use crate::auth::AuthManager;

/// Identity of the caller behind a validated session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// User id from the token subject
    pub user_id: Uuid,
    /// User email; services resolve the user by it
    pub email: String,
}

/// Authenticate a request from its `Authorization: Bearer <token>` header
///
/// # Errors
///
/// Returns `AuthRequired` when the header is missing, and `AuthInvalid`,
/// `AuthExpired`, or `AuthMalformed` when the token is rejected
pub fn authenticate_headers(
    headers: &HeaderMap,
    auth_manager: &AuthManager,
) -> AppResult<AuthenticatedUser> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| {
            AppError::auth_required()
                .with_details(serde_json::json!({ "reason": error_messages::MISSING_AUTH_HEADER }))
        })?
        .to_str()
        .map_err(|_| AppError::auth_invalid(error_messages::INVALID_AUTH_HEADER))?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::auth_invalid(error_messages::INVALID_AUTH_HEADER))?;

    let claims = auth_manager.validate_token(token)?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::auth_invalid("Token subject is not a user id"))?;

    Ok(AuthenticatedUser {
        user_id,
        email: claims.email,
    })
}

#[cfg(test)]
mod tests {
    use forkast_core::errors::ErrorCode;
    use forkast_core::models::User;
    use http::HeaderValue;

    use super::*;

    fn manager() -> AuthManager {
        AuthManager::new(b"middleware-test-secret", 1)
    }

    #[test]
    fn test_missing_header_requires_auth() {
        let err = authenticate_headers(&HeaderMap::new(), &manager()).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        let err = authenticate_headers(&headers, &manager()).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthInvalid);
    }

    #[test]
    fn test_valid_token_yields_identity() {
        let user = User::new("cook@forkast.app".into(), "hash".into());
        let token = manager().generate_token(&user).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        let caller = authenticate_headers(&headers, &manager()).unwrap();
        assert_eq!(caller.user_id, user.id);
        assert_eq!(caller.email, "cook@forkast.app");
    }
}
