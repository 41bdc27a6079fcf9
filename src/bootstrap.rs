// ABOUTME: Startup restoration of the persisted session
// ABOUTME: Exchanges a stored token for the current-user profile and clears the loading gate once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Session bootstrap
//!
//! Failures never escape: a missing token, an unreachable backend, or a
//! rejected token all leave the session unauthenticated, with the cause
//! recorded in the logs only.

use healthapp_core::errors::{AppError, AppResult, ErrorCode};
use healthapp_core::models::{BearerToken, Session, UserProfile};
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::api::{ApiFactory, Endpoint};
use crate::session::SessionStore;
use crate::storage::TokenStore;

/// Flag that starts raised and is lowered exactly once
#[derive(Debug)]
pub struct LoadingGate {
    loading: watch::Sender<bool>,
}

impl Default for LoadingGate {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingGate {
    /// Create a raised gate
    #[must_use]
    pub fn new() -> Self {
        let (loading, _rx) = watch::channel(true);
        Self { loading }
    }

    /// Whether bootstrap is still running
    #[must_use]
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Lower the gate; returns `false` if it was already lowered
    #[must_use]
    pub fn finish(&self) -> bool {
        self.loading.send_if_modified(|loading| {
            let was_loading = *loading;
            *loading = false;
            was_loading
        })
    }

    /// Wait until the gate is lowered
    pub async fn wait_ready(&self) {
        let mut rx = self.loading.subscribe();
        if rx.wait_for(|loading| !*loading).await.is_err() {
            warn!("Loading gate closed before bootstrap finished");
        }
    }

    /// Subscribe to gate changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }
}

/// How bootstrap ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// No persisted token; no request was made
    NoToken,
    /// The profile was fetched and dispatched as `login`
    Restored,
    /// Reading the token or fetching the profile failed
    Failed {
        /// Whether the rejected token was removed from storage
        cleared_token: bool,
    },
}

/// One-shot startup routine restoring the session from a persisted token
pub struct SessionBootstrap<'a> {
    api: &'a ApiFactory,
    tokens: &'a dyn TokenStore,
    session: &'a SessionStore,
    gate: &'a LoadingGate,
    clear_stale_token: bool,
}

impl<'a> SessionBootstrap<'a> {
    /// Wire the collaborators
    #[must_use]
    pub const fn new(
        api: &'a ApiFactory,
        tokens: &'a dyn TokenStore,
        session: &'a SessionStore,
        gate: &'a LoadingGate,
    ) -> Self {
        Self {
            api,
            tokens,
            session,
            gate,
            clear_stale_token: false,
        }
    }

    /// Remove a token the backend rejects instead of keeping it for next start
    #[must_use]
    pub const fn clear_stale_token(mut self, clear: bool) -> Self {
        self.clear_stale_token = clear;
        self
    }

    /// Run bootstrap and lower the loading gate, whatever the outcome
    pub async fn run(self) -> BootstrapOutcome {
        let outcome = self.restore().await;
        if !self.gate.finish() {
            debug!("Loading gate was already lowered");
        }
        info!(outcome = ?outcome, "Session bootstrap finished");
        outcome
    }

    async fn restore(&self) -> BootstrapOutcome {
        let token = match self.tokens.load_token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No persisted token; starting unauthenticated");
                return BootstrapOutcome::NoToken;
            }
            Err(e) => {
                error!(error = %e, "Failed to read persisted token");
                return BootstrapOutcome::Failed {
                    cleared_token: false,
                };
            }
        };

        match self.fetch_profile(&token).await {
            Ok(profile) => {
                if profile.role().is_none() {
                    warn!(
                        role = profile.raw_role().unwrap_or("<missing>"),
                        "Restored session has an unrecognized role; showing the login screen"
                    );
                }
                if let Err(e) = self.session.login(Session::new(profile, token)).await {
                    error!(error = %e, "Failed to dispatch restored session");
                    return BootstrapOutcome::Failed {
                        cleared_token: false,
                    };
                }
                BootstrapOutcome::Restored
            }
            Err(e) => {
                warn!(
                    error = %e,
                    code = ?e.code,
                    "Could not restore session from persisted token"
                );
                BootstrapOutcome::Failed {
                    cleared_token: self.maybe_clear(&e).await,
                }
            }
        }
    }

    async fn fetch_profile(&self, token: &BearerToken) -> AppResult<UserProfile> {
        let payload: Value = self
            .api
            .authenticated(token)
            .get(&Endpoint::CurrentUser, &[])
            .await?;
        Ok(UserProfile::from_value(payload))
    }

    async fn maybe_clear(&self, error: &AppError) -> bool {
        if !self.clear_stale_token || error.code != ErrorCode::AuthInvalid {
            return false;
        }
        match self.tokens.clear_token().await {
            Ok(()) => {
                info!("Removed persisted token rejected by the backend");
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to remove rejected token");
                false
            }
        }
    }
}
