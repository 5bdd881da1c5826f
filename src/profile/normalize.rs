//! Shape normalization for caller-supplied profile payloads.
//!
//! Callers hand the persistence layer either a flat record or one with the
//! profile fields nested under a `profile` key. This module resolves that
//! ambiguity once and produces the canonical [`UserProfileRecord`], stamping
//! timestamps through an injected clock so the function stays testable.

use chrono::{DateTime, Utc};

use super::model::{ProfileDetail, ProfileInput, UserProfileRecord};

/// Wall-clock capability injected into normalization.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Normalizes an input payload into the canonical record, treating it as a
/// first write: `createdAt` and `lastActive` are both stamped to now.
pub fn normalize(input: &ProfileInput, clock: &dyn Clock) -> UserProfileRecord {
    normalize_with_existing(input, None, clock)
}

/// Normalizes an input payload against an already-stored record, if any.
///
/// Per-field resolution prefers `input.profile.f` over the flat `input.f`;
/// a field defined in neither source stays absent. Missing `userName` is not
/// an error — validation belongs upstream. When `existing` is provided its
/// `createdAt` survives, so repeated normalization only touches `lastActive`.
pub fn normalize_with_existing(
    input: &ProfileInput,
    existing: Option<&UserProfileRecord>,
    clock: &dyn Clock,
) -> UserProfileRecord {
    let fields = input.resolve();
    let now = clock.now();
    let created_at = existing.map(|record| record.created_at).unwrap_or(now);
    let onboarding_complete = fields.onboarding_complete.unwrap_or(false);

    UserProfileRecord {
        user_name: fields.user_name,
        email: fields.email.clone(),
        grade: fields.grade.clone(),
        target_exam_year: fields.target_exam_year,
        exam_date: fields.exam_date,
        onboarding_complete,
        created_at,
        last_active: now,
        subjects: input.subjects.clone().unwrap_or_default(),
        gamification: input.gamification.clone().unwrap_or_default(),
        profile: ProfileDetail {
            email: fields.email,
            grade: fields.grade,
            target_exam_year: fields.target_exam_year,
            onboarding_complete,
            created_at: Some(created_at),
            last_active: Some(now),
        },
        evaluation: input.evaluation.clone(),
        study_plan: input.study_plan.clone(),
        agent_interactions: Default::default(),
        study_sessions: Default::default(),
        learning_path: Default::default(),
    }
}
