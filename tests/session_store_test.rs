// ABOUTME: Integration tests for the session container
// ABOUTME: Verifies wholesale login replacement, logout token removal, and published updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{expert_session, init_test_logging, user_session, CountingTokenStore};
use healthapp::errors::ErrorCode;
use healthapp::models::BearerToken;
use healthapp::session::{SessionAction, SessionState, SessionStore};
use healthapp::storage::TokenStore;
use tokio::task;

#[tokio::test]
async fn test_logout_requests_exactly_one_removal_from_any_state() {
    init_test_logging();

    for seed in [None, Some(user_session(1)), Some(expert_session(2))] {
        let tokens = CountingTokenStore::with_token("T1").await;
        let store = SessionStore::new(tokens.clone());
        if let Some(session) = seed {
            store.login(session).await.unwrap();
        }

        store.logout().await.unwrap();

        assert_eq!(store.current(), SessionState::Unauthenticated);
        assert_eq!(tokens.removes(), 1);
        assert!(tokens.stored_token().await.is_none());
    }
}

#[tokio::test]
async fn test_login_twice_and_login_replacement() {
    let tokens = CountingTokenStore::new();
    let store = SessionStore::new(tokens.clone());

    store.login(user_session(1)).await.unwrap();
    store.login(user_session(1)).await.unwrap();
    assert_eq!(store.current(), SessionState::Authenticated(user_session(1)));

    store.login(expert_session(2)).await.unwrap();
    assert_eq!(store.current(), SessionState::Authenticated(expert_session(2)));

    // Login never touches storage
    assert_eq!(tokens.sets() + tokens.removes(), 0);
    assert_eq!(store.revision(), 3);
}

#[tokio::test]
async fn test_failed_removal_is_surfaced_after_state_is_cleared() {
    init_test_logging();
    let tokens = CountingTokenStore::with_token("T1").await;
    tokens.fail_removals();
    let store = SessionStore::new(tokens.clone());
    store.login(user_session(1)).await.unwrap();
    let mut watcher = store.subscribe();

    let error = store.logout().await.unwrap_err();

    assert_eq!(error.code, ErrorCode::StorageError);
    assert_eq!(store.current(), SessionState::Unauthenticated);
    assert!(watcher.has_changed().unwrap());
    assert_eq!(*watcher.borrow_and_update(), SessionState::Unauthenticated);
    assert_eq!(tokens.stored_token().await.as_deref(), Some("T1"));
}

#[tokio::test]
async fn test_subscriber_observes_logout() {
    let tokens = CountingTokenStore::new();
    let store = SessionStore::new(tokens);
    let mut watcher = store.subscribe();

    let observer = tokio::spawn(async move {
        let mut seen = Vec::new();
        while watcher.changed().await.is_ok() {
            let authenticated = watcher.borrow_and_update().is_authenticated();
            seen.push(authenticated);
            if !authenticated {
                break;
            }
        }
        seen
    });

    store.login(user_session(1)).await.unwrap();
    task::yield_now().await;
    store.logout().await.unwrap();

    let seen = observer.await.unwrap();
    assert_eq!(seen.last(), Some(&false));
    assert_eq!(store.revision(), 2);
}

#[tokio::test]
async fn test_unrecognized_action_leaves_state_and_storage_alone() {
    let tokens = CountingTokenStore::with_token("T1").await;
    let store = SessionStore::new(tokens.clone());
    store.login(user_session(5)).await.unwrap();

    store.dispatch(SessionAction::Unrecognized).await.unwrap();

    assert_eq!(store.current(), SessionState::Authenticated(user_session(5)));
    assert_eq!(tokens.removes(), 0);
    assert_eq!(
        tokens.load_token().await.unwrap(),
        Some(BearerToken::new("T1"))
    );
}
