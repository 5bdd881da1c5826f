//! Placeholder quiz generation and evaluation.
//!
//! Real question generation lives behind an external model service; the core
//! only depends on these interfaces and the canned data lets the onboarding
//! flow run end to end without it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Topic {
    pub id: String,
    pub name: String,
}

impl Topic {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub topics: Vec<Topic>,
}

/// The built-in subject catalog offered during onboarding.
pub fn subject_catalog() -> Vec<Subject> {
    vec![
        Subject {
            id: "math".to_string(),
            name: "Mathematics".to_string(),
            description: "Covers core concepts of O-Level Mathematics.".to_string(),
            icon: "🧮".to_string(),
            topics: vec![
                Topic::new("algebra", "Algebra"),
                Topic::new("geometry", "Geometry"),
                Topic::new("trigonometry", "Trigonometry"),
                Topic::new("statistics", "Statistics"),
            ],
        },
        Subject {
            id: "english".to_string(),
            name: "English".to_string(),
            description: "Focuses on grammar, comprehension, and writing.".to_string(),
            icon: "✍️".to_string(),
            topics: vec![
                Topic::new("grammar", "Grammar"),
                Topic::new("comprehension", "Comprehension"),
                Topic::new("writing", "Essay Writing"),
            ],
        },
    ]
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QuestionKind {
    #[serde(rename = "MCQ")]
    Mcq,
    #[serde(rename = "Open")]
    Open,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub question_type: QuestionKind,
    pub options: Vec<String>,
    pub subject_name: Option<String>,
    pub topic_name: Option<String>,
    pub difficulty: Difficulty,
}

/// Answers keyed by question index.
pub type QuizAnswers = BTreeMap<usize, String>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectEvaluation {
    pub level: u32,
    pub analysis: String,
}

/// Per-subject diagnostic outcome, opaque to the persistence core.
pub type Evaluation = BTreeMap<String, SubjectEvaluation>;

/// Builds the placeholder diagnostic quiz for the chosen subjects.
pub fn generate_evaluation_quiz(
    subjects: &[Subject],
    topics_by_subject: &BTreeMap<String, Vec<Topic>>,
    level: &str,
    exam_year: i32,
) -> Vec<QuizQuestion> {
    log::debug!(
        "generating placeholder quiz: {} subjects, level={level}, exam_year={exam_year}",
        subjects.len()
    );
    let first = subjects.first();
    vec![QuizQuestion {
        question: "What is 2 + 2?".to_string(),
        question_type: QuestionKind::Mcq,
        options: vec!["3".to_string(), "4".to_string(), "5".to_string()],
        subject_name: first.map(|subject| subject.name.clone()),
        topic_name: first
            .and_then(|subject| topics_by_subject.get(&subject.id))
            .and_then(|topics| topics.first())
            .map(|topic| topic.name.clone()),
        difficulty: Difficulty::Easy,
    }]
}

/// Scores a quiz attempt. Canned: every learner lands at a basic level.
pub fn evaluate_quiz_answers(quiz: &[QuizQuestion], answers: &QuizAnswers) -> Evaluation {
    log::debug!(
        "evaluating placeholder quiz: {} questions, {} answers",
        quiz.len(),
        answers.len()
    );
    [(
        "Mathematics".to_string(),
        SubjectEvaluation {
            level: 2,
            analysis: "You have a basic understanding of the concepts.".to_string(),
        },
    )]
    .into_iter()
    .collect()
}
