//! Onboarding domain models
//!
//! This module defines the first-run wizard: a short linear flow that
//! collects profile fields, an initial set of goals and the apps to monitor,
//! and ends in a single commit.

pub mod draft;
pub mod wizard;

pub use draft::{OnboardingDraft, ProfileFields};
pub use wizard::{OnboardingAction, OnboardingEvent, OnboardingStep, OnboardingWizard};
