pub mod auth;
pub mod config;
pub mod events;
pub mod onboarding;
pub mod profile;
pub mod services;
pub mod storage;

// Re-export commonly used types for convenience.
pub use config::AppConfig;
pub use onboarding::{MirrorStatus, OnboardingWizard, ProgressService, WizardStep, WriteOutcome};
pub use profile::{normalize, ProfileInput, UserProfileRecord};
pub use storage::{DocumentMirror, LocalCacheStore, LocalStoreConfig, RemoteMirror};
