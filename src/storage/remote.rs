//! Best-effort remote mirror for learner records.
//!
//! The mirror is a secondary store: its failures are reported but never roll
//! back or invalidate a write already committed to the local cache.
//! Unavailability (force-local mode, or a mirror that was never configured)
//! is a routing decision, not an error — writes degrade to a no-op success
//! and reads to not-found.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::profile::merge::{apply_updates, UpdateMap};
use crate::profile::model::UserProfileRecord;

/// Remote document store seam. One document per user id, kept in a "users"
/// collection, written via full-document replace and patched via merge.
pub trait RemoteMirror {
    fn is_available(&self) -> bool;

    /// Full-document replace. Repeating a write is always safe.
    fn write_profile(&self, user_id: &str, record: &UserProfileRecord) -> Result<()>;

    /// Raw mirrored document, or `None` when absent or the mirror is down.
    fn read_document(&self, user_id: &str) -> Result<Option<Value>>;

    /// Merge-patch with dotted-path keys expanded before the merge.
    fn merge_update(&self, user_id: &str, updates: &UpdateMap) -> Result<()>;

    /// Typed convenience over [`RemoteMirror::read_document`].
    fn read_profile(&self, user_id: &str) -> Result<Option<UserProfileRecord>> {
        match self.read_document(user_id)? {
            Some(value) => Ok(Some(
                serde_json::from_value(value).context("Failed parsing mirrored profile document")?,
            )),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MirrorConfig {
    /// Root of the mirrored document tree. `None` means the mirror was never
    /// initialized (e.g. missing configuration).
    pub root: Option<PathBuf>,
    /// Process-local kill switch routing everything to the local store.
    pub force_local: bool,
}

impl MirrorConfig {
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            force_local: false,
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }
}

/// Directory-backed document mirror standing in for a hosted document store.
pub struct DocumentMirror {
    config: MirrorConfig,
}

impl DocumentMirror {
    pub fn new(config: MirrorConfig) -> Self {
        Self { config }
    }

    fn doc_path(&self, user_id: &str) -> Option<PathBuf> {
        let root = self.config.root.as_ref()?;
        let safe = user_id.replace(['/', '\\', ':'], "_");
        Some(root.join("users").join(format!("{safe}.json")))
    }

    fn write_value(&self, path: &Path, value: &Value) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed creating mirror directory {:?}", parent))?;
        }
        let payload = serde_json::to_vec_pretty(value)
            .with_context(|| format!("Failed serializing mirrored document {:?}", path))?;
        fs::write(path, payload)
            .with_context(|| format!("Failed writing mirrored document {:?}", path))
    }
}

impl RemoteMirror for DocumentMirror {
    fn is_available(&self) -> bool {
        !self.config.force_local && self.config.root.is_some()
    }

    fn write_profile(&self, user_id: &str, record: &UserProfileRecord) -> Result<()> {
        if !self.is_available() {
            return Ok(());
        }
        let Some(path) = self.doc_path(user_id) else {
            return Ok(());
        };
        let value = serde_json::to_value(record)
            .with_context(|| format!("Failed serializing profile record for {user_id}"))?;
        self.write_value(&path, &value)
    }

    fn read_document(&self, user_id: &str) -> Result<Option<Value>> {
        if !self.is_available() {
            return Ok(None);
        }
        let Some(path) = self.doc_path(user_id) else {
            return Ok(None);
        };
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed reading mirrored document {:?}", path))
            }
        };
        let value = serde_json::from_slice(&data)
            .with_context(|| format!("Failed parsing mirrored document {:?}", path))?;
        Ok(Some(value))
    }

    fn merge_update(&self, user_id: &str, updates: &UpdateMap) -> Result<()> {
        if !self.is_available() {
            return Ok(());
        }
        let Some(path) = self.doc_path(user_id) else {
            return Ok(());
        };
        let existing = self.read_document(user_id)?.unwrap_or(Value::Null);
        let merged = apply_updates(existing, updates);
        self.write_value(&path, &merged)
    }
}

/// The never-initialized mirror. Everything degrades gracefully.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMirror;

impl RemoteMirror for NullMirror {
    fn is_available(&self) -> bool {
        false
    }

    fn write_profile(&self, _user_id: &str, _record: &UserProfileRecord) -> Result<()> {
        Ok(())
    }

    fn read_document(&self, _user_id: &str) -> Result<Option<Value>> {
        Ok(None)
    }

    fn merge_update(&self, _user_id: &str, _updates: &UpdateMap) -> Result<()> {
        Ok(())
    }
}
