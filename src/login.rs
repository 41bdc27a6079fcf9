// ABOUTME: Username/password login via the OAuth2 password grant
// ABOUTME: Validates the form, exchanges credentials for a token, and seeds the session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Login flow
//!
//! Validation failures name the offending field and never reach the network.
//! Every later failure, whether the backend refused the credentials or could
//! not be reached at all, is collapsed into [`LoginError::InvalidCredentials`]
//! after being logged.

use healthapp_core::constants::oauth::GRANT_TYPE_PASSWORD;
use healthapp_core::errors::{AppResult, LoginError, LoginField};
use healthapp_core::models::{BearerToken, Session, UserProfile};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::api::{ApiFactory, Endpoint};
use crate::config::{ClientConfig, OAuthClientCredentials};
use crate::logging::AppLogger;
use crate::navigation::{NavTree, Navigator};
use crate::session::{Principal, SessionStore};
use crate::storage::TokenStore;

/// Contents of the login form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Username as typed
    pub username: String,
    /// Password as typed
    pub password: String,
}

impl LoginForm {
    /// Create a form
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::Username => &self.username,
            LoginField::Password => &self.password,
        }
    }

    /// Check that every field is non-empty after trimming, in form order
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::MissingField`] for the first blank field
    pub fn validate(&self) -> Result<(), LoginError> {
        LoginField::REQUIRED
            .iter()
            .find(|field| self.value(**field).trim().is_empty())
            .map_or(Ok(()), |field| {
                Err(LoginError::MissingField { field: *field })
            })
    }
}

/// Body of the password grant request
#[derive(Serialize)]
pub struct PasswordGrantRequest<'a> {
    /// Username as typed
    pub username: &'a str,
    /// Password as typed
    pub password: &'a str,
    /// Application client id
    pub client_id: &'a str,
    /// Application client secret
    pub client_secret: &'a str,
    /// Always `password`
    pub grant_type: &'a str,
}

impl<'a> PasswordGrantRequest<'a> {
    /// Build the grant for a form and application credentials
    #[must_use]
    pub fn new(form: &'a LoginForm, oauth: &'a OAuthClientCredentials) -> Self {
        Self {
            username: &form.username,
            password: &form.password,
            client_id: &oauth.client_id,
            client_secret: &oauth.client_secret,
            grant_type: GRANT_TYPE_PASSWORD,
        }
    }
}

/// Token grant response; only `access_token` is used
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Bearer credential
    pub access_token: String,
    /// Usually `Bearer`
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Refresh token, unused by this client
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Granted scope
    #[serde(default)]
    pub scope: Option<String>,
}

/// Collaborators of a login attempt
pub struct LoginFlow<'a> {
    api: &'a ApiFactory,
    config: &'a ClientConfig,
    tokens: &'a dyn TokenStore,
    session: &'a SessionStore,
    navigator: &'a dyn Navigator,
}

impl<'a> LoginFlow<'a> {
    /// Wire the collaborators; application credentials are read from `config` on submit
    #[must_use]
    pub const fn new(
        api: &'a ApiFactory,
        config: &'a ClientConfig,
        tokens: &'a dyn TokenStore,
        session: &'a SessionStore,
        navigator: &'a dyn Navigator,
    ) -> Self {
        Self {
            api,
            config,
            tokens,
            session,
            navigator,
        }
    }

    /// Validate, grant, persist, fetch the profile, dispatch `login`, and reset navigation
    ///
    /// # Errors
    ///
    /// Returns a field error when validation fails, otherwise
    /// [`LoginError::InvalidCredentials`] for any failure
    pub async fn submit(&self, form: &LoginForm) -> Result<Session, LoginError> {
        form.validate()?;

        match self.authenticate(form).await {
            Ok(session) => {
                AppLogger::log_auth_event(&form.username, "login", true, None);
                self.reset_navigation(&session);
                Ok(session)
            }
            Err(e) => {
                AppLogger::log_auth_event(&form.username, "login", false, Some(&e.to_string()));
                Err(LoginError::InvalidCredentials)
            }
        }
    }

    async fn authenticate(&self, form: &LoginForm) -> AppResult<Session> {
        let oauth = self.config.oauth_credentials()?;

        let grant: TokenResponse = self
            .api
            .anonymous()
            .post_json(&Endpoint::Login, &PasswordGrantRequest::new(form, oauth))
            .await?;
        let token = BearerToken::new(grant.access_token);

        self.tokens.persist_token(&token).await?;

        let payload: Value = self
            .api
            .authenticated(&token)
            .get(&Endpoint::CurrentUser, &[])
            .await?;
        let session = Session::new(UserProfile::from_value(payload), token);

        self.session.login(session.clone()).await?;
        Ok(session)
    }

    fn reset_navigation(&self, session: &Session) {
        match Principal::from_session(Some(session)) {
            Principal::Anonymous => {
                warn!(
                    role = session.profile.raw_role().unwrap_or("<missing>"),
                    "Logged in with an unrecognized role; navigation left unchanged"
                );
            }
            principal => {
                let tree = NavTree::select(&principal);
                info!(root = tree.root_route(), "Resetting navigation after login");
                self.navigator.reset(tree);
            }
        }
    }
}
