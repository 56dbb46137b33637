// ABOUTME: axum response conversion for AppError
// ABOUTME: Renders the unified JSON error body with the status mapped from the error code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use tracing::{error, warn};

use super::{AppError, ErrorResponse};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.code.is_client_error() {
            warn!(code = ?self.code, status = status.as_u16(), "{}", self.message);
        } else {
            error!(
                code = ?self.code,
                status = status.as_u16(),
                source = ?self.source,
                "{}",
                self.message
            );
        }

        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_renders_404() {
        let response = AppError::not_found("Recipe 999").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_duplicate_renders_409() {
        let response = AppError::already_exists("User").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_auth_failure_renders_401() {
        let response = AppError::auth_invalid("Invalid email or password").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
