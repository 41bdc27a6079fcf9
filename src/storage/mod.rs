// ABOUTME: Persisted key-value storage used to survive restarts
// ABOUTME: TokenStore trait with file and in-memory backends selected by configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Backend selection from configuration
pub mod factory;
/// JSON file backend
pub mod file;
/// In-memory backend
pub mod memory;

pub use factory::TokenStorage;
pub use file::FileTokenStore;
pub use memory::InMemoryTokenStore;

use async_trait::async_trait;
use healthapp_core::constants::storage::TOKEN_KEY;
use healthapp_core::errors::AppResult;
use healthapp_core::models::BearerToken;

/// Durable string storage keyed by name
///
/// Only the bearer token is stored today, under [`TOKEN_KEY`]. The
/// `*_token` helpers wrap the raw operations for that key.
///
/// # Examples
///
/// ```rust,no_run
/// use healthapp::storage::{InMemoryTokenStore, TokenStore};
/// use healthapp::models::BearerToken;
/// # async fn example() -> healthapp::errors::AppResult<()> {
/// let store = InMemoryTokenStore::new();
/// store.persist_token(&BearerToken::new("T1")).await?;
/// assert!(store.load_token().await?.is_some());
/// store.clear_token().await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove `key`; removing an absent key succeeds
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Read the persisted bearer token
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn load_token(&self) -> AppResult<Option<BearerToken>> {
        Ok(self
            .get(TOKEN_KEY)
            .await?
            .filter(|token| !token.is_empty())
            .map(BearerToken::new))
    }

    /// Persist the bearer token
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn persist_token(&self, token: &BearerToken) -> AppResult<()> {
        self.set(TOKEN_KEY, token.expose()).await
    }

    /// Remove the persisted bearer token
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn clear_token(&self) -> AppResult<()> {
        self.remove(TOKEN_KEY).await
    }
}
