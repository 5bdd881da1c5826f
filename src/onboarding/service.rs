//! Orchestration of learner-progress persistence.
//!
//! `ProgressService` sequences normalize → write local → write remote. The
//! local cache is the source of truth: a failed or skipped mirror write is
//! reported in the outcome but never fails the operation or rolls anything
//! back. Operations against one user id must be issued sequentially; the
//! service provides no internal locking.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::AppConfig;
use crate::events::{EventSource, Subscription};
use crate::profile::merge::{apply_updates, UpdateMap};
use crate::profile::model::{ProfileInput, UserProfileRecord};
use crate::profile::normalize::{normalize_with_existing, Clock, SystemClock};
use crate::storage::local::{LocalCacheStore, LocalWriteOutcome};
use crate::storage::remote::{DocumentMirror, RemoteMirror};

/// How the best-effort mirror fared for one operation.
#[derive(Debug)]
pub enum MirrorStatus {
    /// The remote document matches the local record.
    Synced,
    /// The mirror was unavailable; skipping it is not an error.
    Skipped,
    /// The mirror was reachable but the write failed. The local record stands.
    Failed(anyhow::Error),
}

/// Outcome of a persistence operation. The local write always succeeded when
/// one of these exists; `mirror` distinguishes full sync from partial success.
#[derive(Debug)]
pub struct WriteOutcome {
    pub local: LocalWriteOutcome,
    pub mirror: MirrorStatus,
}

impl WriteOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self.mirror, MirrorStatus::Synced)
    }

    /// True when the local write landed but the remote one failed.
    pub fn is_partial(&self) -> bool {
        matches!(self.mirror, MirrorStatus::Failed(_))
    }
}

/// Snapshot broadcast to progress subscribers after every local commit.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub user_id: String,
    pub key: String,
    pub record: Value,
}

/// Canned analytics, pending a real computation service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalytics {
    pub total_study_time: u64,
    pub subjects_enrolled: u32,
    pub average_proficiency: f32,
    pub study_streak: u32,
}

pub struct ProgressService {
    store: LocalCacheStore,
    mirror: Box<dyn RemoteMirror>,
    clock: Box<dyn Clock>,
    events: EventSource<ProgressUpdate>,
}

impl ProgressService {
    pub fn new(
        store: LocalCacheStore,
        mirror: Box<dyn RemoteMirror>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            store,
            mirror,
            clock,
            events: EventSource::new(),
        }
    }

    pub fn with_system_clock(store: LocalCacheStore, mirror: Box<dyn RemoteMirror>) -> Self {
        Self::new(store, mirror, Box::new(SystemClock))
    }

    /// Builds the service from the install config: directory-backed stores,
    /// system clock.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let store = LocalCacheStore::new(config.local_store_config()?)?;
        let mirror = DocumentMirror::new(config.mirror_config());
        Ok(Self::with_system_clock(store, Box::new(mirror)))
    }

    pub fn store(&self) -> &LocalCacheStore {
        &self.store
    }

    /// Normalizes and persists a profile, leaving `onboardingComplete` as the
    /// input resolved it.
    pub fn create_user_profile(
        &self,
        user_id: &str,
        input: &ProfileInput,
    ) -> Result<WriteOutcome> {
        let record = self.normalized(user_id, input);
        self.commit(user_id, record)
    }

    /// Finishes the onboarding wizard: the stored record carries
    /// `onboardingComplete: true` regardless of what the input said.
    pub fn complete_onboarding(&self, user_id: &str, input: &ProfileInput) -> Result<WriteOutcome> {
        let mut record = self.normalized(user_id, input);
        record.onboarding_complete = true;
        record.profile.onboarding_complete = true;
        self.commit(user_id, record)
    }

    fn normalized(&self, user_id: &str, input: &ProfileInput) -> UserProfileRecord {
        // createdAt survives re-normalization when a record already exists.
        let existing = self.store.get::<UserProfileRecord>(user_id);
        normalize_with_existing(input, existing.as_ref(), self.clock.as_ref())
    }

    fn commit(&self, user_id: &str, record: UserProfileRecord) -> Result<WriteOutcome> {
        let snapshot = serde_json::to_value(&record)
            .with_context(|| format!("Failed serializing profile record for {user_id}"))?;
        let local = self.store.put(user_id, &snapshot)?;

        let mirror = if self.mirror.is_available() {
            match self.mirror.write_profile(user_id, &record) {
                Ok(()) => MirrorStatus::Synced,
                Err(err) => {
                    log::warn!(
                        "remote profile write failed for {user_id}; local copy stays authoritative: {err:#}"
                    );
                    MirrorStatus::Failed(err)
                }
            }
        } else {
            MirrorStatus::Skipped
        };

        self.events.emit(&ProgressUpdate {
            user_id: user_id.to_string(),
            key: local.key.clone(),
            record: snapshot,
        });
        Ok(WriteOutcome { local, mirror })
    }

    /// Applies a dotted-path partial update. The local document is merged and
    /// written first; when the mirror is up it receives the same merge-patch
    /// and its copy re-primes the cache.
    pub fn update_user_data(&self, user_id: &str, updates: &UpdateMap) -> Result<WriteOutcome> {
        let existing = self
            .store
            .get::<Value>(user_id)
            .unwrap_or(Value::Object(Map::new()));
        let mut merged = apply_updates(existing, updates);
        let mut local = self.store.put(user_id, &merged)?;

        let mirror = if self.mirror.is_available() {
            match self.mirror.merge_update(user_id, updates) {
                Ok(()) => {
                    match self.mirror.read_document(user_id) {
                        Ok(Some(document)) => {
                            local = self.store.put(user_id, &document)?;
                            merged = document;
                        }
                        Ok(None) => {}
                        Err(err) => {
                            log::warn!("could not re-read mirrored document for {user_id}: {err:#}");
                        }
                    }
                    MirrorStatus::Synced
                }
                Err(err) => {
                    log::warn!(
                        "remote merge-patch failed for {user_id}; local copy stays authoritative: {err:#}"
                    );
                    MirrorStatus::Failed(err)
                }
            }
        } else {
            MirrorStatus::Skipped
        };

        self.events.emit(&ProgressUpdate {
            user_id: user_id.to_string(),
            key: local.key.clone(),
            record: merged,
        });
        Ok(WriteOutcome { local, mirror })
    }

    /// Alias kept for callers that think in terms of saving progress.
    pub fn save_user_progress(&self, user_id: &str, updates: &UpdateMap) -> Result<WriteOutcome> {
        self.update_user_data(user_id, updates)
    }

    /// Cached record for a user, if any. Malformed cache entries read as
    /// absent, per the store contract.
    pub fn get_user_progress(&self, user_id: &str) -> Option<UserProfileRecord> {
        self.store.get(user_id)
    }

    /// Fetches the mirrored record and re-primes the local cache with it
    /// (write-through caching on read).
    pub fn refresh_from_remote(&self, user_id: &str) -> Result<Option<UserProfileRecord>> {
        let Some(document) = self.mirror.read_document(user_id)? else {
            return Ok(None);
        };
        let record: UserProfileRecord = serde_json::from_value(document.clone())
            .with_context(|| format!("Failed parsing mirrored record for {user_id}"))?;
        let local = self.store.put(user_id, &document)?;
        self.events.emit(&ProgressUpdate {
            user_id: user_id.to_string(),
            key: local.key,
            record: document,
        });
        Ok(Some(record))
    }

    /// Removes every namespaced key for every user. Used for logout/reset.
    pub fn clear_all_local_data(&self) -> Result<usize> {
        self.store.clear_all()
    }

    /// Delivers the current cached record immediately, then every subsequent
    /// local commit for the same storage key.
    pub fn subscribe_to_user_progress(
        &self,
        user_id: &str,
        callback: impl Fn(&Value) + Send + 'static,
    ) -> Subscription {
        if let Some(current) = self.store.get::<Value>(user_id) {
            callback(&current);
        }
        let target = self.store.key_for(user_id);
        self.events.subscribe(move |update: &ProgressUpdate| {
            if update.key == target {
                callback(&update.record);
            }
        })
    }

    pub fn user_analytics(&self, user_id: &str) -> Option<UserAnalytics> {
        self.store
            .get::<Value>(user_id)
            .map(|_| UserAnalytics::default())
    }

    /// Spaced-repetition feed. Nothing schedules reviews yet.
    pub fn topics_for_review(&self, _user_id: &str) -> Vec<String> {
        Vec::new()
    }
}
