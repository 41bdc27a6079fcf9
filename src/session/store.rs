// ABOUTME: Observable session container that applies actions and runs their effects
// ABOUTME: Publishes every new state over a watch channel and removes the token on logout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use healthapp_core::errors::AppResult;
use healthapp_core::models::Session;
use tokio::sync::watch;
use tracing::error;

use super::{reduce, SessionAction, SessionEffect, SessionState};
use crate::logging::AppLogger;
use crate::storage::TokenStore;

/// Receiver yielding the session after every published transition
pub type SessionWatcher = watch::Receiver<SessionState>;

/// Holds the current session for the lifetime of the application value
pub struct SessionStore {
    sender: watch::Sender<SessionState>,
    tokens: Arc<dyn TokenStore>,
    revision: AtomicU64,
}

impl SessionStore {
    /// Create an unauthenticated store whose effects act on `tokens`
    #[must_use]
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        let (sender, _rx) = watch::channel(SessionState::Unauthenticated);
        Self {
            sender,
            tokens,
            revision: AtomicU64::new(0),
        }
    }

    /// Apply an action, publish the resulting state, then run its effect
    ///
    /// Unrecognized actions leave the state untouched and publish nothing.
    ///
    /// # Errors
    ///
    /// Returns the token store error when logout cannot remove the persisted
    /// token; the session is already cleared at that point
    pub async fn dispatch(&self, action: SessionAction) -> AppResult<()> {
        let name = action.name();
        let publishes = !matches!(action, SessionAction::Unrecognized);
        let mut effect = None;

        self.sender.send_if_modified(|state| {
            let transition = reduce(mem::take(state), action);
            *state = transition.state;
            effect = transition.effect;
            publishes
        });

        if publishes {
            let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
            AppLogger::log_session_transition(name, self.is_authenticated(), revision);
        }

        match effect {
            Some(SessionEffect::RemovePersistedToken) => {
                self.tokens.clear_token().await.inspect_err(|e| {
                    error!(error = %e, "Failed to remove persisted token after logout");
                })
            }
            None => Ok(()),
        }
    }

    /// Replace the session with `session`
    ///
    /// # Errors
    ///
    /// Login has no effect, so this only fails if dispatch itself does
    pub async fn login(&self, session: Session) -> AppResult<()> {
        self.dispatch(SessionAction::Login(session)).await
    }

    /// Clear the session and remove the persisted token
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted token cannot be removed
    pub async fn logout(&self) -> AppResult<()> {
        self.dispatch(SessionAction::Logout).await
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn current(&self) -> SessionState {
        self.sender.borrow().clone()
    }

    /// Run `f` against the current state without cloning it
    pub fn with_current<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.sender.borrow())
    }

    /// Whether a principal is logged in
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.sender.borrow().is_authenticated()
    }

    /// Subscribe to state changes
    #[must_use]
    pub fn subscribe(&self) -> SessionWatcher {
        self.sender.subscribe()
    }

    /// Number of published transitions so far
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryTokenStore;
    use healthapp_core::models::{BearerToken, UserProfile};
    use serde_json::json;

    fn session() -> Session {
        Session::new(
            UserProfile::from_value(json!({"id": 1, "role": "user"})),
            BearerToken::new("T1"),
        )
    }

    #[tokio::test]
    async fn test_login_publishes_to_subscribers() {
        let store = SessionStore::new(Arc::new(InMemoryTokenStore::new()));
        let mut watcher = store.subscribe();

        store.login(session()).await.unwrap();

        assert!(watcher.has_changed().unwrap());
        assert_eq!(
            *watcher.borrow_and_update(),
            SessionState::Authenticated(session())
        );
        assert_eq!(store.revision(), 1);
    }

    #[tokio::test]
    async fn test_logout_removes_token_after_clearing_state() {
        let tokens = Arc::new(InMemoryTokenStore::new());
        tokens.persist_token(&BearerToken::new("T1")).await.unwrap();
        let store = SessionStore::new(tokens.clone());
        store.login(session()).await.unwrap();

        store.logout().await.unwrap();

        assert_eq!(store.current(), SessionState::Unauthenticated);
        assert!(tokens.load_token().await.unwrap().is_none());
        assert_eq!(store.revision(), 2);
    }

    #[tokio::test]
    async fn test_unrecognized_action_publishes_nothing() {
        let store = SessionStore::new(Arc::new(InMemoryTokenStore::new()));
        store.login(session()).await.unwrap();
        let mut watcher = store.subscribe();
        watcher.borrow_and_update();

        store.dispatch(SessionAction::Unrecognized).await.unwrap();

        assert!(!watcher.has_changed().unwrap());
        assert!(store.is_authenticated());
        assert_eq!(store.revision(), 1);
    }
}
