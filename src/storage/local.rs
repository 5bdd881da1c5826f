//! Namespaced JSON key-value store on the local filesystem.
//!
//! This store is the durability floor: every other component must write here
//! successfully before an operation counts as complete, because the remote
//! mirror is best-effort. Each record lives in its own file named after the
//! derived key, `<namespace>_user_progress_<userId>` for signed-in users or
//! the shared `<namespace>_demo_progress` key in demo mode.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// User id that always maps to the shared demo key, even without demo mode.
pub const DEMO_USER_ID: &str = "demo-user";

/// Explicit store configuration. Demo mode lives here instead of in
/// process-wide state so multiple stores can coexist in one process.
#[derive(Debug, Clone)]
pub struct LocalStoreConfig {
    pub root: PathBuf,
    pub namespace: String,
    pub demo_mode: bool,
}

impl LocalStoreConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            namespace: "learningBuddy".to_string(),
            demo_mode: false,
        }
    }

    pub fn demo(root: impl Into<PathBuf>) -> Self {
        Self {
            demo_mode: true,
            ..Self::new(root)
        }
    }
}

/// Result returned after committing a record to the local store.
#[derive(Debug, Clone)]
pub struct LocalWriteOutcome {
    pub key: String,
    pub path: PathBuf,
    pub hash: String,
}

pub struct LocalCacheStore {
    config: LocalStoreConfig,
}

impl LocalCacheStore {
    pub fn new(config: LocalStoreConfig) -> Result<Self> {
        fs::create_dir_all(&config.root)
            .with_context(|| format!("Failed creating local store root {:?}", config.root))?;
        Ok(Self { config })
    }

    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    /// Derives the storage key for a user id. All demo sessions collapse onto
    /// one key by design; concurrent demo tabs race and the last writer wins.
    pub fn key_for(&self, user_id: &str) -> String {
        if self.config.demo_mode || user_id == DEMO_USER_ID {
            format!("{}_demo_progress", self.config.namespace)
        } else {
            let safe = user_id.replace(['/', '\\', ':'], "_");
            format!("{}_user_progress_{}", self.config.namespace, safe)
        }
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        self.config.root.join(format!("{}.json", self.key_for(user_id)))
    }

    /// Serializes and writes a record. Serialization failure is fatal to this
    /// one operation and is never retried here.
    pub fn put<T: Serialize>(&self, user_id: &str, value: &T) -> Result<LocalWriteOutcome> {
        let key = self.key_for(user_id);
        let path = self.path_for(user_id);
        let payload = serde_json::to_vec_pretty(value)
            .with_context(|| format!("Failed serializing progress for key {key}"))?;
        let hash = compute_hash(&payload);
        fs::write(&path, &payload)
            .with_context(|| format!("Failed writing cached progress {:?}", path))?;
        Ok(LocalWriteOutcome { key, path, hash })
    }

    /// Loads a record. A missing key or malformed JSON is treated as absent
    /// data, never an error.
    pub fn get<T: DeserializeOwned>(&self, user_id: &str) -> Option<T> {
        let path = self.path_for(user_id);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    log::warn!("failed reading cached progress {:?}: {err}", path);
                }
                return None;
            }
        };
        match serde_json::from_slice(&data) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("discarding malformed cached progress {:?}: {err}", path);
                None
            }
        }
    }

    pub fn delete(&self, user_id: &str) -> Result<()> {
        let path = self.path_for(user_id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("Failed removing cached progress {:?}", path))
            }
        }
    }

    /// Removes every key under this store's namespace. Used for logout and
    /// demo-mode reset; an empty store is not an error.
    pub fn clear_all(&self) -> Result<usize> {
        let prefix = format!("{}_", self.config.namespace);
        let entries = match fs::read_dir(&self.config.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed listing local store root {:?}", self.config.root)
                })
            }
        };
        let mut removed = 0;
        for entry in entries {
            let entry = entry.context("Failed reading local store entry")?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with(&prefix) {
                fs::remove_file(entry.path())
                    .with_context(|| format!("Failed removing {:?}", entry.path()))?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Computes a lowercase hex SHA-256 hash of the provided bytes.
pub fn compute_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{:x}", digest)
}
