pub mod service;
pub mod wizard;

pub use service::{MirrorStatus, ProgressService, ProgressUpdate, UserAnalytics, WriteOutcome};
pub use wizard::{OnboardingWizard, WizardStep};
