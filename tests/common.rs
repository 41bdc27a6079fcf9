// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Logging setup and capture, profile fixtures, a counting token store, and a recording navigator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `healthapp`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::env;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use healthapp::app::App;
use healthapp::config::ClientConfig;
use healthapp::errors::{AppError, AppResult};
use healthapp::models::{BearerToken, Session, UserProfile};
use healthapp::navigation::{NavTree, Navigator};
use healthapp::storage::{InMemoryTokenStore, TokenStore};
use serde_json::{json, Value};
use tracing::dispatcher::DefaultGuard;
use tracing::{subscriber, Level};
use tracing_subscriber::fmt::MakeWriter;
use wiremock::MockServer;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Log output captured by a thread-local subscriber
///
/// Install it with [`LogCapture::install`] and keep the guard alive for as
/// long as events should be recorded. `#[tokio::test]` runs on the current
/// thread, so events from awaited futures land here too.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn install() -> (Self, DefaultGuard) {
        init_test_logging();
        let capture = Self::default();
        let capturing = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(capture.clone())
            .finish();
        let guard = subscriber::set_default(capturing);
        (capture, guard)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }

    /// Lines containing `needle`
    pub fn lines_with(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_owned)
            .collect()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Current-user payload with the given id and role
pub fn profile_json(id: u64, role: &str) -> Value {
    json!({
        "id": id,
        "username": format!("user{id}"),
        "first_name": "Lan",
        "last_name": "Nguyen",
        "role": role,
        "tracking_mode": "personal",
        "avatar": null
    })
}

/// Session for a standard user
pub fn user_session(id: u64) -> Session {
    Session::new(
        UserProfile::from_value(profile_json(id, "user")),
        BearerToken::new(format!("token-{id}")),
    )
}

/// Session for an expert
pub fn expert_session(id: u64) -> Session {
    Session::new(
        UserProfile::from_value(profile_json(id, "expert")),
        BearerToken::new(format!("token-{id}")),
    )
}

/// Token store that counts calls and can be told to fail removals
#[derive(Default)]
pub struct CountingTokenStore {
    inner: InMemoryTokenStore,
    pub gets: AtomicUsize,
    pub sets: AtomicUsize,
    pub removes: AtomicUsize,
    fail_remove: AtomicBool,
    fail_get: AtomicBool,
}

impl CountingTokenStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Store pre-seeded with a token
    pub async fn with_token(token: &str) -> Arc<Self> {
        let store = Self::default();
        store.inner.persist_token(&BearerToken::new(token)).await.unwrap();
        Arc::new(store)
    }

    pub fn fail_removals(&self) {
        self.fail_remove.store(true, Ordering::SeqCst);
    }

    pub fn fail_reads(&self) {
        self.fail_get.store(true, Ordering::SeqCst);
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn removes(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    pub async fn stored_token(&self) -> Option<String> {
        self.inner
            .load_token()
            .await
            .unwrap()
            .map(|t| t.expose().to_owned())
    }
}

#[async_trait]
impl TokenStore for CountingTokenStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(AppError::storage("credentials file is unreadable"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(AppError::storage("disk is read-only"));
        }
        self.inner.remove(key).await
    }
}

/// Navigator recording every reset
#[derive(Default)]
pub struct RecordingNavigator {
    resets: Mutex<Vec<NavTree>>,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn resets(&self) -> Vec<NavTree> {
        self.resets.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn reset(&self, tree: NavTree) {
        self.resets.lock().unwrap().push(tree);
    }
}

/// Configuration pointing at a mock server with application credentials set
pub fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig::for_base_url(&server.uri())
        .unwrap()
        .with_oauth("test-client", "test-secret")
}

/// App wired to a mock server, a counting store, and a recording navigator
pub fn test_app(
    config: ClientConfig,
    tokens: &Arc<CountingTokenStore>,
    navigator: &Arc<RecordingNavigator>,
) -> App {
    init_test_logging();
    App::with_parts(config, tokens.clone(), navigator.clone()).unwrap()
}
