// ABOUTME: Token store factory for configuration-based backend selection
// ABOUTME: Wraps the file and in-memory stores behind one concrete type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use healthapp_core::errors::AppResult;
use tracing::info;

use super::{FileTokenStore, InMemoryTokenStore, TokenStore};
use crate::config::{TokenStoreBackend, TokenStoreConfig};

/// Unified token store interface
#[derive(Debug)]
pub enum TokenStorage {
    /// JSON file on disk
    File(FileTokenStore),
    /// Process memory
    Memory(InMemoryTokenStore),
}

impl TokenStorage {
    /// Create the backend named by configuration
    #[must_use]
    pub fn from_config(config: &TokenStoreConfig) -> Self {
        match config.backend {
            TokenStoreBackend::File => {
                info!(path = %config.path.display(), "Using file token store");
                Self::File(FileTokenStore::new(config.path.clone()))
            }
            TokenStoreBackend::Memory => {
                info!("Using in-memory token store");
                Self::Memory(InMemoryTokenStore::new())
            }
        }
    }

    /// Backend kind
    #[must_use]
    pub const fn backend(&self) -> TokenStoreBackend {
        match self {
            Self::File(_) => TokenStoreBackend::File,
            Self::Memory(_) => TokenStoreBackend::Memory,
        }
    }
}

#[async_trait]
impl TokenStore for TokenStorage {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        match self {
            Self::File(store) => store.get(key).await,
            Self::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        match self {
            Self::File(store) => store.set(key, value).await,
            Self::Memory(store) => store.set(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        match self {
            Self::File(store) => store.remove(key).await,
            Self::Memory(store) => store.remove(key).await,
        }
    }
}
