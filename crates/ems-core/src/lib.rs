//! # ems-core
//!
//! Core domain models and business rules for EarnMyScroll.
//!
//! This crate contains pure business logic without any infrastructure dependencies.
//! Everything that talks to the backend platform does so through the traits in [`ports`].

// Public module exports
pub mod app_dirs;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod error;
pub mod goal;
pub mod ids;
pub mod onboarding;
pub mod ports;
pub mod profile;
pub mod security;
pub mod session;

// Re-export commonly used types at the crate root
pub use app_state::{AppAction, AppEvent, AppState, AppStateMachine, UnauthenticatedReason};
pub use config::AppConfig;
pub use error::BackendError;
pub use goal::{Goal, GoalError, GoalTitle, ProofType};
pub use ids::{GoalId, UserId};
pub use onboarding::{OnboardingDraft, OnboardingStep, OnboardingWizard};
pub use profile::{OnboardingFlag, Profile, ProfilePatch};
pub use session::{Session, SessionUser};
