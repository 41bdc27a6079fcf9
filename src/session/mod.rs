// ABOUTME: Session state model and the pure transition function over it
// ABOUTME: Login replaces the session wholesale; logout clears it and requests token removal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Session state
//!
//! [`reduce`] is a pure function from the current state and an action to the
//! next state plus an optional side effect. The effect is executed by
//! [`SessionStore`] after the new state has been published.

/// Observable session container
pub mod store;

pub use store::SessionStore;

use healthapp_core::models::{Role, Session};
use serde::{Deserialize, Serialize};

/// Current session value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// No principal is logged in
    #[default]
    Unauthenticated,
    /// A principal is logged in
    Authenticated(Session),
}

impl SessionState {
    /// Logged-in session, if any
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Unauthenticated => None,
            Self::Authenticated(session) => Some(session),
        }
    }

    /// Whether a principal is logged in
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Principal derived from the session's role
    #[must_use]
    pub fn principal(&self) -> Principal<'_> {
        Principal::from_session(self.session())
    }
}

/// Who is using the app, as far as navigation is concerned
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Principal<'a> {
    /// Nobody is logged in, or the session's role is not one we know
    Anonymous,
    /// Logged in with the `user` role
    StandardUser(&'a Session),
    /// Logged in with the `expert` role
    Expert(&'a Session),
}

impl<'a> Principal<'a> {
    /// Derive the principal; unknown or missing roles resolve to anonymous
    ///
    /// Derivation is silent. Callers that accept a session log unknown roles once.
    #[must_use]
    pub fn from_session(session: Option<&'a Session>) -> Self {
        let Some(session) = session else {
            return Self::Anonymous;
        };
        match session.role() {
            Some(Role::StandardUser) => Self::StandardUser(session),
            Some(Role::Expert) => Self::Expert(session),
            None => Self::Anonymous,
        }
    }

    /// Role of the principal
    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        match self {
            Self::Anonymous => None,
            Self::StandardUser(_) => Some(Role::StandardUser),
            Self::Expert(_) => Some(Role::Expert),
        }
    }

    /// Session behind the principal
    #[must_use]
    pub const fn session(&self) -> Option<&'a Session> {
        match *self {
            Self::Anonymous => None,
            Self::StandardUser(session) | Self::Expert(session) => Some(session),
        }
    }
}

/// Actions accepted by the session container
///
/// Serialized as `{"type": "login", "payload": {...}}`. Any other `type`
/// deserializes to [`SessionAction::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum SessionAction {
    /// Replace the session with the payload
    Login(Session),
    /// Clear the session and remove the persisted token
    Logout,
    /// Action this client does not handle; leaves the state unchanged
    #[serde(other)]
    Unrecognized,
}

impl SessionAction {
    /// Action name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Logout => "logout",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    /// Delete the persisted bearer token
    RemovePersistedToken,
}

/// Result of applying an action
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Next state
    pub state: SessionState,
    /// Effect to run after the state is published
    pub effect: Option<SessionEffect>,
}

/// Apply `action` to `state`
///
/// `Login` never inspects the payload. `Logout` always requests exactly one
/// token removal, even when already unauthenticated.
#[must_use]
pub fn reduce(state: SessionState, action: SessionAction) -> Transition {
    match action {
        SessionAction::Login(session) => Transition {
            state: SessionState::Authenticated(session),
            effect: None,
        },
        SessionAction::Logout => Transition {
            state: SessionState::Unauthenticated,
            effect: Some(SessionEffect::RemovePersistedToken),
        },
        SessionAction::Unrecognized => Transition {
            state,
            effect: None,
        },
    }
}
