// ABOUTME: Integration tests for registration, login, and session tokens
// ABOUTME: Covers duplicate emails, uniform login failures, and token round trips
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::error::Error;

use common::create_test_resources;
use forkast_core::constants::error_messages;
use forkast_core::errors::ErrorCode;
use forkast_server::auth::AuthManager;
use forkast_server::routes::auth::CredentialsRequest;
use forkast_server::routes::AuthService;

fn credentials(email: &str, password: &str) -> CredentialsRequest {
    CredentialsRequest {
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn test_register_then_login() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;
    let service = AuthService::new(resources.clone());

    let registered = service
        .register(credentials("cook@forkast.app", "simmer-slowly"))
        .await?;
    assert_eq!(registered.user.email, "cook@forkast.app");

    let logged_in = service
        .login(credentials("cook@forkast.app", "simmer-slowly"))
        .await?;
    assert_eq!(logged_in.user.user_id, registered.user.user_id);

    let claims = resources.auth_manager.validate_token(&logged_in.token)?;
    assert_eq!(claims.email, "cook@forkast.app");
    assert_eq!(claims.sub, registered.user.user_id);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_rejected_without_write() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;
    let service = AuthService::new(resources.clone());

    service
        .register(credentials("cook@forkast.app", "simmer-slowly"))
        .await?;
    let err = service
        .register(credentials("cook@forkast.app", "another-password"))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(resources.database.count_users().await?, 1);

    // The first password still works
    service
        .login(credentials("cook@forkast.app", "simmer-slowly"))
        .await?;
    Ok(())
}

#[tokio::test]
async fn test_email_is_normalized() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;
    let service = AuthService::new(resources);

    service
        .register(credentials("  Cook@Forkast.app ", "simmer-slowly"))
        .await?;
    let err = service
        .register(credentials("cook@forkast.app", "simmer-slowly"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    Ok(())
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;
    let service = AuthService::new(resources);
    service
        .register(credentials("cook@forkast.app", "simmer-slowly"))
        .await?;

    let wrong_password = service
        .login(credentials("cook@forkast.app", "boil-quickly"))
        .await
        .unwrap_err();
    let unknown_email = service
        .login(credentials("ghost@forkast.app", "simmer-slowly"))
        .await
        .unwrap_err();

    for err in [&wrong_password, &unknown_email] {
        assert_eq!(err.code, ErrorCode::AuthInvalid);
        assert_eq!(err.message, error_messages::INVALID_CREDENTIALS);
    }
    Ok(())
}

#[tokio::test]
async fn test_register_validates_credentials() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;
    let service = AuthService::new(resources.clone());

    let err = service
        .register(credentials("not-an-email", "simmer-slowly"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let err = service
        .register(credentials("cook@forkast.app", "short"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    assert_eq!(resources.database.count_users().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() -> Result<(), Box<dyn Error>> {
    let resources = create_test_resources().await?;
    let service = AuthService::new(resources.clone());
    let response = service
        .register(credentials("cook@forkast.app", "simmer-slowly"))
        .await?;

    let foreign = AuthManager::new(b"some-other-secret", 1);
    assert!(foreign.validate_token(&response.token).is_err());
    assert!(resources.auth_manager.validate_token(&response.token).is_ok());
    Ok(())
}
