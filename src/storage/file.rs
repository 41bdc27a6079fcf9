// ABOUTME: File-backed token store persisting a small JSON map on disk
// ABOUTME: Writes go through a temp file and rename so readers never see partial files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use healthapp_core::errors::{AppError, AppResult};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::TokenStore;

type Entries = BTreeMap<String, String>;

/// Key-value store kept in a JSON object file
///
/// A missing file reads as an empty store. The parent directory is created on
/// first write; on unix the file is restricted to the owner.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileTokenStore {
    /// Create a store backed by `path`; nothing is touched until first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> AppResult<Entries> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Entries::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::storage(format!(
                    "Token store {} is not a JSON object: {e}",
                    self.path.display()
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(AppError::storage(format!(
                "Failed to read token store {}: {e}",
                self.path.display()
            ))
            .with_source(e)),
        }
    }

    async fn write_entries(&self, entries: &Entries) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::storage(format!(
                    "Failed to create token store directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let body = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).await.map_err(|e| {
            AppError::storage(format!("Failed to write {}: {e}", tmp.display()))
        })?;
        restrict_permissions(&tmp).await;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            // The temp file holds the token; never leave it behind
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                warn!(path = %tmp.display(), error = %cleanup, "Could not remove temp token file");
            }
            return Err(AppError::storage(format!(
                "Failed to replace token store {}: {e}",
                self.path.display()
            ))
            .with_source(e));
        }

        debug!(path = %self.path.display(), keys = entries.len(), "Token store written");
        Ok(())
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    if let Err(e) = fs::set_permissions(path, Permissions::from_mode(0o600)).await {
        warn!(path = %path.display(), error = %e, "Could not restrict token store permissions");
    }
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) {}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_entries(&entries).await
    }
}
