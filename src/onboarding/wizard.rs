//! Per-session onboarding state machine.
//!
//! Transitions are strictly forward via explicit actions; `back` moves
//! exactly one step and re-enters that step's screen without discarding data
//! already entered elsewhere. `OnboardingComplete` is terminal — once the
//! wizard finishes, app state belongs to the dashboard.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::profile::model::ProfileInput;
use crate::services::quiz::{Evaluation, QuizQuestion};
use crate::services::study_plan::StudyPlan;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    NotStarted,
    ProfileCollected,
    QuizGenerated,
    QuizEvaluated,
    PlanGenerated,
    OnboardingComplete,
}

impl WizardStep {
    fn previous(self) -> Option<Self> {
        match self {
            Self::NotStarted => None,
            Self::ProfileCollected => Some(Self::NotStarted),
            Self::QuizGenerated => Some(Self::ProfileCollected),
            Self::QuizEvaluated => Some(Self::QuizGenerated),
            Self::PlanGenerated => Some(Self::QuizEvaluated),
            Self::OnboardingComplete => Some(Self::PlanGenerated),
        }
    }
}

/// Accumulates the artifacts of each wizard step so revisiting a step never
/// loses what was entered later.
#[derive(Debug, Clone, Default)]
pub struct OnboardingWizard {
    step: WizardStep,
    profile: Option<ProfileInput>,
    quiz: Option<Vec<QuizQuestion>>,
    answers: BTreeMap<usize, String>,
    evaluation: Option<Evaluation>,
    plan: Option<StudyPlan>,
}

impl OnboardingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn is_complete(&self) -> bool {
        self.step() == WizardStep::OnboardingComplete
    }

    fn advance(&mut self, from: WizardStep, to: WizardStep) -> Result<()> {
        if self.step != from {
            bail!(
                "Cannot move to {to:?} from {:?}; expected to be at {from:?}.",
                self.step
            );
        }
        self.step = to;
        Ok(())
    }

    /// Records the learner profile collected on the first screens.
    pub fn collect_profile(&mut self, profile: ProfileInput) -> Result<()> {
        self.advance(WizardStep::NotStarted, WizardStep::ProfileCollected)?;
        self.profile = Some(profile);
        Ok(())
    }

    pub fn attach_quiz(&mut self, quiz: Vec<QuizQuestion>) -> Result<()> {
        self.advance(WizardStep::ProfileCollected, WizardStep::QuizGenerated)?;
        self.quiz = Some(quiz);
        Ok(())
    }

    /// Stores one answer. Valid any time a quiz exists, so the learner can
    /// revise answers after going back from the results screen.
    pub fn record_answer(&mut self, question: usize, answer: impl Into<String>) -> Result<()> {
        if self.quiz.is_none() {
            bail!("No quiz has been generated for this session.");
        }
        self.answers.insert(question, answer.into());
        Ok(())
    }

    pub fn record_evaluation(&mut self, evaluation: Evaluation) -> Result<()> {
        self.advance(WizardStep::QuizGenerated, WizardStep::QuizEvaluated)?;
        self.evaluation = Some(evaluation);
        Ok(())
    }

    pub fn attach_plan(&mut self, plan: StudyPlan) -> Result<()> {
        self.advance(WizardStep::QuizEvaluated, WizardStep::PlanGenerated)?;
        self.plan = Some(plan);
        Ok(())
    }

    /// Seals the wizard. The caller is expected to persist the outcome via
    /// `ProgressService::complete_onboarding`.
    pub fn finish(&mut self) -> Result<()> {
        self.advance(WizardStep::PlanGenerated, WizardStep::OnboardingComplete)
    }

    /// Moves exactly one step backward, keeping all entered data.
    pub fn back(&mut self) -> Result<()> {
        if self.is_complete() {
            bail!("Onboarding is complete; the wizard cannot be re-entered.");
        }
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                Ok(())
            }
            None => bail!("Already at the first step."),
        }
    }

    pub fn profile(&self) -> Option<&ProfileInput> {
        self.profile.as_ref()
    }

    pub fn quiz(&self) -> Option<&[QuizQuestion]> {
        self.quiz.as_deref()
    }

    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    pub fn plan(&self) -> Option<&StudyPlan> {
        self.plan.as_ref()
    }
}
