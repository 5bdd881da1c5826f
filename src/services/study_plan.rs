//! Placeholder study-plan generation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::quiz::{Evaluation, Subject, Topic};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanEntry {
    pub date: String,
    pub topic: String,
    pub activity: String,
}

/// Weekly activities keyed by subject name, opaque to the persistence core.
pub type StudyPlan = BTreeMap<String, Vec<PlanEntry>>;

/// Builds the placeholder plan from a diagnostic evaluation.
pub fn generate_study_plan(
    evaluation: &Evaluation,
    subjects: &[Subject],
    topics_by_subject: &BTreeMap<String, Vec<Topic>>,
) -> StudyPlan {
    log::debug!(
        "generating placeholder study plan: {} evaluated subjects, {} chosen, {} topic lists",
        evaluation.len(),
        subjects.len(),
        topics_by_subject.len()
    );
    [(
        "Mathematics".to_string(),
        vec![
            PlanEntry {
                date: "Week 1".to_string(),
                topic: "Algebra".to_string(),
                activity: "Practice linear equations.".to_string(),
            },
            PlanEntry {
                date: "Week 2".to_string(),
                topic: "Geometry".to_string(),
                activity: "Review circle theorems.".to_string(),
            },
        ],
    )]
    .into_iter()
    .collect()
}
