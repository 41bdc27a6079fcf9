// ABOUTME: Environment configuration for the healthapp client
// ABOUTME: Backend URL, OAuth application credentials, token storage, and bootstrap policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use std::env;
use std::fmt;
use std::path::PathBuf;

use healthapp_core::constants::{defaults, env_vars, storage};
use healthapp_core::errors::{AppError, AppResult, ErrorCode};
use tracing::{debug, warn};
use url::Url;

/// Backend used to persist the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenStoreBackend {
    /// JSON file on disk, survives restarts
    #[default]
    File,
    /// Process memory only
    Memory,
}

impl TokenStoreBackend {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Self::Memory,
            "file" => Self::File,
            other => {
                warn!("Unknown token store backend '{other}', using file storage");
                Self::File
            }
        }
    }
}

impl fmt::Display for TokenStoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Token storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStoreConfig {
    /// Storage backend
    pub backend: TokenStoreBackend,
    /// File used by the file backend
    pub path: PathBuf,
}

/// `OAuth2` application credentials sent with the password grant
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthClientCredentials {
    /// Application client id
    pub client_id: String,
    /// Application client secret
    pub client_secret: String,
}

impl fmt::Debug for OAuthClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// Complete client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL; always ends with a slash
    pub base_url: Url,
    /// Application credentials, required only for login
    pub oauth: Option<OAuthClientCredentials>,
    /// Where the bearer token is persisted
    pub token_store: TokenStoreConfig,
    /// Remove a persisted token the backend rejects during bootstrap
    pub clear_stale_token: bool,
    /// User agent sent with every request
    pub user_agent: String,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is malformed or no token path can be determined
    pub fn from_env() -> AppResult<Self> {
        let base_url = parse_base_url(
            &env::var(env_vars::BASE_URL).unwrap_or_else(|_| defaults::BASE_URL.to_owned()),
        )?;

        let oauth = match (
            env::var(env_vars::CLIENT_ID).ok(),
            env::var(env_vars::CLIENT_SECRET).ok(),
        ) {
            (Some(client_id), Some(client_secret)) => Some(OAuthClientCredentials {
                client_id,
                client_secret,
            }),
            (None, None) => None,
            _ => {
                warn!(
                    "Only one of {} and {} is set; login will be unavailable",
                    env_vars::CLIENT_ID,
                    env_vars::CLIENT_SECRET
                );
                None
            }
        };

        let backend = env::var(env_vars::TOKEN_STORE)
            .map(|value| TokenStoreBackend::from_str_or_default(&value))
            .unwrap_or_default();

        let path = match env::var(env_vars::TOKEN_PATH) {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_token_path()?,
        };

        let clear_stale_token = env::var(env_vars::CLEAR_STALE_TOKEN)
            .map(|value| parse_bool(&value))
            .unwrap_or(false);

        let user_agent = env::var(env_vars::USER_AGENT).unwrap_or_else(|_| default_user_agent());

        let config = Self {
            base_url,
            oauth,
            token_store: TokenStoreConfig { backend, path },
            clear_stale_token,
            user_agent,
        };
        debug!(
            base_url = %config.base_url,
            token_store = %config.token_store.backend,
            clear_stale_token = config.clear_stale_token,
            "Client configuration loaded"
        );
        Ok(config)
    }

    /// Configuration pointing at `base_url` with an in-memory token store
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid absolute URL
    pub fn for_base_url(base_url: &str) -> AppResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            oauth: None,
            token_store: TokenStoreConfig {
                backend: TokenStoreBackend::Memory,
                path: PathBuf::new(),
            },
            clear_stale_token: false,
            user_agent: default_user_agent(),
        })
    }

    /// Replace the backend base URL
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid absolute URL
    pub fn with_base_url(mut self, base_url: &str) -> AppResult<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Use a file token store at `path`
    #[must_use]
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_store = TokenStoreConfig {
            backend: TokenStoreBackend::File,
            path: path.into(),
        };
        self
    }

    /// Set the `OAuth2` application credentials
    #[must_use]
    pub fn with_oauth(mut self, client_id: &str, client_secret: &str) -> Self {
        self.oauth = Some(OAuthClientCredentials {
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
        });
        self
    }

    /// Application credentials for the password grant
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are not configured
    pub fn oauth_credentials(&self) -> AppResult<&OAuthClientCredentials> {
        self.oauth.as_ref().ok_or_else(|| {
            AppError::new(
                ErrorCode::ConfigMissing,
                format!(
                    "{} and {} must be set to log in",
                    env_vars::CLIENT_ID,
                    env_vars::CLIENT_SECRET
                ),
            )
        })
    }
}

/// Parse and normalize a base URL so relative joins keep its path prefix
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed or cannot carry a path
pub fn parse_base_url(raw: &str) -> AppResult<Url> {
    let mut url = Url::parse(raw.trim()).map_err(|e| {
        AppError::new(ErrorCode::ConfigInvalid, format!("Invalid base URL '{raw}': {e}"))
    })?;
    if url.cannot_be_a_base() {
        return Err(AppError::new(
            ErrorCode::ConfigInvalid,
            format!("Base URL '{raw}' cannot carry a path"),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn default_user_agent() -> String {
    format!("{}/{}", defaults::SERVICE_NAME, env!("CARGO_PKG_VERSION"))
}

/// Default location of the file token store: `<config dir>/healthapp/credentials.json`
///
/// # Errors
///
/// Returns an error if the platform has no configuration directory
pub fn default_token_path() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| {
            dir.join(storage::CONFIG_DIR_NAME)
                .join(storage::CREDENTIALS_FILE)
        })
        .ok_or_else(|| {
            AppError::new(
                ErrorCode::ConfigMissing,
                format!(
                    "Could not determine config directory; set {}",
                    env_vars::TOKEN_PATH
                ),
            )
        })
}
