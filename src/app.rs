// ABOUTME: Application shell wiring configuration, storage, HTTP, session, and navigation
// ABOUTME: Runs bootstrap once, gates rendering on it, and exposes login, logout, and dashboard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application shell
//!
//! [`App`] owns every collaborator for its own lifetime. Nothing here is
//! global: two `App` values in one process share no state.

use std::sync::Arc;

use chrono::NaiveDate;
use healthapp_core::errors::{AppError, AppResult, LoginError};
use healthapp_core::models::Session;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::api::ApiFactory;
use crate::bootstrap::{BootstrapOutcome, LoadingGate, SessionBootstrap};
use crate::config::ClientConfig;
use crate::dashboard::{self, Dashboard, DashboardLoader};
use crate::login::{LoginFlow, LoginForm};
use crate::navigation::{NavTree, Navigator, RouteStack};
use crate::session::{Principal, SessionState, SessionStore};
use crate::storage::{TokenStorage, TokenStore};

/// The running client
pub struct App {
    config: ClientConfig,
    api: ApiFactory,
    tokens: Arc<dyn TokenStore>,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
    gate: LoadingGate,
    bootstrap: OnceCell<BootstrapOutcome>,
}

impl App {
    /// Build the app with the configured token store and an in-process route stack
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: ClientConfig) -> AppResult<Self> {
        let tokens: Arc<dyn TokenStore> = Arc::new(TokenStorage::from_config(&config.token_store));
        Self::with_parts(config, tokens, Arc::new(RouteStack::default()))
    }

    /// Build the app around caller-provided storage and navigation
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn with_parts(
        config: ClientConfig,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> AppResult<Self> {
        let api = ApiFactory::new(&config)?;
        let session = SessionStore::new(Arc::clone(&tokens));
        Ok(Self {
            config,
            api,
            tokens,
            session,
            navigator,
            gate: LoadingGate::new(),
            bootstrap: OnceCell::new(),
        })
    }

    /// Run bootstrap on first call and show the selected tree; later calls
    /// return the first outcome without doing anything
    pub async fn start(&self) -> BootstrapOutcome {
        let mut first_run = false;
        let outcome = *self
            .bootstrap
            .get_or_init(|| {
                first_run = true;
                SessionBootstrap::new(
                    &self.api,
                    self.tokens.as_ref(),
                    &self.session,
                    &self.gate,
                )
                .clear_stale_token(self.config.clear_stale_token)
                .run()
            })
            .await;

        if first_run {
            let tree = self.session.with_current(NavTree::for_state);
            info!(root = tree.root_route(), "Showing initial navigation tree");
            self.navigator.reset(tree);
        }
        outcome
    }

    /// Selected tree, or `None` while bootstrap is still running
    #[must_use]
    pub fn current_tree(&self) -> Option<NavTree> {
        if self.gate.is_loading() {
            return None;
        }
        Some(self.session.with_current(NavTree::for_state))
    }

    /// Submit the login form
    ///
    /// # Errors
    ///
    /// Returns a field error or the generic credential error
    pub async fn login(&self, form: &LoginForm) -> Result<Session, LoginError> {
        LoginFlow::new(
            &self.api,
            &self.config,
            self.tokens.as_ref(),
            &self.session,
            self.navigator.as_ref(),
        )
        .submit(form)
        .await
    }

    /// Log out and return to the login screen
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted token could not be removed; the
    /// session is cleared and navigation reset regardless
    pub async fn logout(&self) -> AppResult<()> {
        let result = self.session.logout().await;
        self.navigator.reset(NavTree::Unauthenticated);
        result
    }

    /// Load the home screen of the logged-in standard user
    ///
    /// # Errors
    ///
    /// Returns an error if nobody is logged in or the principal is an expert
    pub async fn dashboard(&self) -> AppResult<Dashboard> {
        let client = self.session.with_current(|state| match state.principal() {
            Principal::StandardUser(session) => Ok(self.api.authenticated(&session.token)),
            Principal::Expert(_) => Err(AppError::invalid_input(
                "The dashboard is only available to standard users",
            )),
            Principal::Anonymous => Err(AppError::auth_required()),
        })?;
        Ok(DashboardLoader::new(&client).load().await)
    }

    /// Load and render the home screen as of `today`
    ///
    /// # Errors
    ///
    /// Returns an error if nobody is logged in or the principal is an expert
    pub async fn render_dashboard(&self, today: NaiveDate) -> AppResult<String> {
        let data = self.dashboard().await?;
        let Some(session) = self.session.current().session().cloned() else {
            warn!("Session ended while the dashboard was loading");
            return Err(AppError::auth_required());
        };
        Ok(dashboard::render(&data, &session.profile, today))
    }

    /// Current session state
    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session.current()
    }

    /// Session container
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Loading gate cleared by bootstrap
    #[must_use]
    pub const fn gate(&self) -> &LoadingGate {
        &self.gate
    }
}
