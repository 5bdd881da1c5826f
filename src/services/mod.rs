pub mod quiz;
pub mod study_plan;

pub use quiz::{
    evaluate_quiz_answers, generate_evaluation_quiz, subject_catalog, Difficulty, Evaluation,
    QuestionKind, QuizAnswers, QuizQuestion, Subject, SubjectEvaluation, Topic,
};
pub use study_plan::{generate_study_plan, PlanEntry, StudyPlan};
