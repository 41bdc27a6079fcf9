// ABOUTME: Integration tests for persisted token storage
// ABOUTME: Verifies file persistence across instances and configuration-based backend selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use healthapp::config::{TokenStoreBackend, TokenStoreConfig};
use healthapp::models::BearerToken;
use healthapp::storage::{FileTokenStore, TokenStorage, TokenStore};
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[tokio::test]
async fn test_token_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("healthapp").join("credentials.json");

    FileTokenStore::new(&path)
        .persist_token(&BearerToken::new("T1"))
        .await
        .unwrap();

    let reopened = FileTokenStore::new(&path);
    assert_eq!(
        reopened.load_token().await.unwrap(),
        Some(BearerToken::new("T1"))
    );
}

#[tokio::test]
async fn test_remove_keeps_other_keys() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path().join("credentials.json"));

    store.set("theme", "dark").await.unwrap();
    store.persist_token(&BearerToken::new("T1")).await.unwrap();
    store.clear_token().await.unwrap();

    assert!(store.load_token().await.unwrap().is_none());
    assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("dark"));

    let raw = fs::read_to_string(store.path()).unwrap();
    let parsed: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, json!({"theme": "dark"}));
}

#[tokio::test]
async fn test_overwrite_replaces_token() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path().join("credentials.json"));

    store.persist_token(&BearerToken::new("old")).await.unwrap();
    store.persist_token(&BearerToken::new("new")).await.unwrap();

    assert_eq!(
        store.load_token().await.unwrap(),
        Some(BearerToken::new("new"))
    );
    assert!(!dir.path().join("credentials.json.tmp").exists());
}

#[tokio::test]
async fn test_factory_file_backend_writes_configured_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    let storage = TokenStorage::from_config(&TokenStoreConfig {
        backend: TokenStoreBackend::File,
        path: path.clone(),
    });

    storage.persist_token(&BearerToken::new("T5")).await.unwrap();

    assert!(path.exists());
    assert_eq!(storage.backend(), TokenStoreBackend::File);
}

#[tokio::test]
async fn test_factory_memory_backend_is_process_local() {
    let config = TokenStoreConfig {
        backend: TokenStoreBackend::Memory,
        path: PathBuf::new(),
    };
    let first = TokenStorage::from_config(&config);
    first.persist_token(&BearerToken::new("T6")).await.unwrap();

    let second = TokenStorage::from_config(&config);
    assert!(second.load_token().await.unwrap().is_none());
    assert!(first.load_token().await.unwrap().is_some());
}
