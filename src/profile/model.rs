//! Data structures for learner profile persistence.
//!
//! `UserProfileRecord` is the single canonical shape ever written to a store.
//! `ProfileInput` is the ambiguous caller-supplied payload: profile fields may
//! arrive flat at the top level or nested under a `profile` key, and both
//! layouts must survive normalization without dropping fields.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gamification counters seeded at onboarding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Gamification {
    pub points: i64,
    pub streak: u32,
    #[serde(default)]
    pub badges: Vec<String>,
}

impl Default for Gamification {
    fn default() -> Self {
        Self {
            points: 100,
            streak: 1,
            badges: vec!["Welcome Badge".to_string()],
        }
    }
}

/// Nested duplicate of the profile fields, kept for readers that still expect
/// the `{profile: {...}}` layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_exam_year: Option<i32>,
    #[serde(default)]
    pub onboarding_complete: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub last_active: Option<DateTime<Utc>>,
}

/// Canonical persisted learner record. Written as-is to the local cache and
/// mirrored to the remote document store when one is configured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_exam_year: Option<i32>,
    /// Free-form date string entered by the learner; not validated here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_date: Option<String>,
    #[serde(default)]
    pub onboarding_complete: bool,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    /// Per-subject progress, opaque to this layer.
    #[serde(default)]
    pub subjects: BTreeMap<String, Value>,
    #[serde(default)]
    pub gamification: Gamification,
    #[serde(default)]
    pub profile: ProfileDetail,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_plan: Option<Value>,
    #[serde(default)]
    pub agent_interactions: BTreeMap<String, Value>,
    #[serde(default)]
    pub study_sessions: BTreeMap<String, Value>,
    #[serde(default)]
    pub learning_path: BTreeMap<String, Value>,
}

/// Profile fields as they may appear nested under the input's `profile` key.
/// Timestamps carried here are ignored; normalization re-stamps them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NestedProfileInput {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub grade: Option<String>,
    pub target_exam_year: Option<i32>,
    pub exam_date: Option<String>,
    pub onboarding_complete: Option<bool>,
}

/// Caller-supplied payload in either the flat or the nested layout.
///
/// Sibling keys that are not profile fields (`subjects`, `evaluation`,
/// `studyPlan`, `gamification`) pass through untouched into the canonical
/// record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub grade: Option<String>,
    pub target_exam_year: Option<i32>,
    pub exam_date: Option<String>,
    pub onboarding_complete: Option<bool>,
    pub profile: Option<NestedProfileInput>,
    pub subjects: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_plan: Option<Value>,
    pub gamification: Option<Gamification>,
}

/// Profile fields after the flat/nested ambiguity has been resolved. The
/// ambiguity never travels past this point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedProfileFields {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub grade: Option<String>,
    pub target_exam_year: Option<i32>,
    pub exam_date: Option<String>,
    pub onboarding_complete: Option<bool>,
}

fn pick<T: Clone>(nested: Option<&T>, flat: Option<&T>) -> Option<T> {
    nested.or(flat).cloned()
}

impl ProfileInput {
    /// Resolves each profile field independently: the nested `profile.*` value
    /// wins when defined, otherwise the flat top-level value is used.
    pub fn resolve(&self) -> ResolvedProfileFields {
        let nested = self.profile.as_ref();
        ResolvedProfileFields {
            user_name: pick(
                nested.and_then(|p| p.user_name.as_ref()),
                self.user_name.as_ref(),
            ),
            email: pick(nested.and_then(|p| p.email.as_ref()), self.email.as_ref()),
            grade: pick(nested.and_then(|p| p.grade.as_ref()), self.grade.as_ref()),
            target_exam_year: pick(
                nested.and_then(|p| p.target_exam_year.as_ref()),
                self.target_exam_year.as_ref(),
            ),
            exam_date: pick(
                nested.and_then(|p| p.exam_date.as_ref()),
                self.exam_date.as_ref(),
            ),
            onboarding_complete: pick(
                nested.and_then(|p| p.onboarding_complete.as_ref()),
                self.onboarding_complete.as_ref(),
            ),
        }
    }
}
