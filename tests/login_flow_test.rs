// ABOUTME: Integration tests for the login flow against a mock backend
// ABOUTME: Verifies validation short-circuits, call counts, error collapsing, and navigation resets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{
    profile_json, test_app, test_config, CountingTokenStore, LogCapture, RecordingNavigator,
};
use healthapp::config::ClientConfig;
use healthapp::errors::{LoginError, LoginField};
use healthapp::login::LoginForm;
use healthapp::navigation::NavTree;
use healthapp::session::SessionState;
use serde_json::json;
use wiremock::matchers::{any, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_grant(server: &MockServer, token: &str, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/o/token/"))
        .and(body_partial_json(json!({
            "username": "lan",
            "password": "secret",
            "client_id": "test-client",
            "client_secret": "test-secret",
            "grant_type": "password"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "token_type": "Bearer",
            "expires_in": 36000,
            "refresh_token": "r",
            "scope": "read write"
        })))
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_profile(server: &MockServer, token: &str, role: &str, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/users/current-user/"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(3, role)))
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_empty_username_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let tokens = CountingTokenStore::new();
    let navigator = RecordingNavigator::new();
    let app = test_app(test_config(&server), &tokens, &navigator);

    let error = app.login(&LoginForm::new("   ", "")).await.unwrap_err();

    assert_eq!(
        error,
        LoginError::MissingField {
            field: LoginField::Username
        }
    );
    assert_eq!(error.user_message(), "Please enter Username");
    assert_eq!(tokens.sets(), 0);
    assert!(navigator.resets().is_empty());
}

#[tokio::test]
async fn test_valid_credentials_for_standard_user() {
    let server = MockServer::start().await;
    mount_grant(&server, "T9", 1).await;
    mount_profile(&server, "T9", "user", 1).await;

    let tokens = CountingTokenStore::new();
    let navigator = RecordingNavigator::new();
    let app = test_app(test_config(&server), &tokens, &navigator);

    let session = app.login(&LoginForm::new("lan", "secret")).await.unwrap();

    assert_eq!(session.token.expose(), "T9");
    assert_eq!(tokens.sets(), 1);
    assert_eq!(tokens.stored_token().await.as_deref(), Some("T9"));
    assert_eq!(app.session().revision(), 1);
    assert_eq!(app.session_state(), SessionState::Authenticated(session));
    assert_eq!(navigator.resets(), vec![NavTree::StandardUser]);
}

#[tokio::test]
async fn test_valid_credentials_for_expert() {
    let server = MockServer::start().await;
    mount_grant(&server, "E1", 1).await;
    mount_profile(&server, "E1", "expert", 1).await;

    let tokens = CountingTokenStore::new();
    let navigator = RecordingNavigator::new();
    let app = test_app(test_config(&server), &tokens, &navigator);

    app.login(&LoginForm::new("lan", "secret")).await.unwrap();

    assert_eq!(navigator.resets(), vec![NavTree::Expert]);
}

#[tokio::test]
async fn test_rejected_grant_is_generic_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/o/token/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid credentials given."
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/current-user/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let tokens = CountingTokenStore::new();
    let navigator = RecordingNavigator::new();
    let app = test_app(test_config(&server), &tokens, &navigator);

    let error = app
        .login(&LoginForm::new("lan", "secret"))
        .await
        .unwrap_err();

    assert_eq!(error, LoginError::InvalidCredentials);
    assert_eq!(error.user_message(), "Invalid username or password.");
    assert_eq!(tokens.sets(), 0);
    assert_eq!(app.session().revision(), 0);
    assert!(navigator.resets().is_empty());
}

#[tokio::test]
async fn test_profile_failure_is_generic_error() {
    let server = MockServer::start().await;
    mount_grant(&server, "T2", 1).await;
    Mock::given(method("GET"))
        .and(path("/users/current-user/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = CountingTokenStore::new();
    let navigator = RecordingNavigator::new();
    let app = test_app(test_config(&server), &tokens, &navigator);

    let error = app
        .login(&LoginForm::new("lan", "secret"))
        .await
        .unwrap_err();

    assert_eq!(error, LoginError::InvalidCredentials);
    // The token was persisted before the profile fetch failed
    assert_eq!(tokens.sets(), 1);
    assert_eq!(app.session_state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_unknown_role_logs_in_without_navigation() {
    let server = MockServer::start().await;
    mount_grant(&server, "A1", 1).await;
    mount_profile(&server, "A1", "admin", 1).await;

    let tokens = CountingTokenStore::new();
    let navigator = RecordingNavigator::new();
    let app = test_app(test_config(&server), &tokens, &navigator);
    let (logs, _guard) = LogCapture::install();

    app.login(&LoginForm::new("lan", "secret")).await.unwrap();

    assert!(app.session_state().is_authenticated());
    assert!(navigator.resets().is_empty());
    for _ in 0..3 {
        assert_eq!(
            NavTree::for_state(&app.session_state()),
            NavTree::Unauthenticated
        );
    }
    // Deriving the tree again stays silent
    assert_eq!(logs.lines_with("unrecognized role").len(), 1);
}

#[tokio::test]
async fn test_missing_application_credentials_is_generic_error() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let tokens = CountingTokenStore::new();
    let navigator = RecordingNavigator::new();
    let config = ClientConfig::for_base_url(&server.uri()).unwrap();
    let app = test_app(config, &tokens, &navigator);
    let (logs, _guard) = LogCapture::install();

    let error = app
        .login(&LoginForm::new("lan", "secret"))
        .await
        .unwrap_err();

    assert_eq!(error, LoginError::InvalidCredentials);
    let events = logs.lines_with("Authentication event");
    assert_eq!(events.len(), 1);
    assert!(events[0].contains("Required configuration is missing"));
    assert!(events[0].contains("HEALTHAPP_CLIENT_ID and HEALTHAPP_CLIENT_SECRET must be set"));
    assert_eq!(tokens.sets(), 0);
}

#[tokio::test]
async fn test_logout_after_login_returns_to_login_root() {
    let server = MockServer::start().await;
    mount_grant(&server, "T3", 1).await;
    mount_profile(&server, "T3", "user", 1).await;

    let tokens = CountingTokenStore::new();
    let navigator = RecordingNavigator::new();
    let app = test_app(test_config(&server), &tokens, &navigator);

    app.login(&LoginForm::new("lan", "secret")).await.unwrap();
    app.logout().await.unwrap();

    assert_eq!(tokens.removes(), 1);
    assert!(tokens.stored_token().await.is_none());
    assert_eq!(
        navigator.resets(),
        vec![NavTree::StandardUser, NavTree::Unauthenticated]
    );
}
