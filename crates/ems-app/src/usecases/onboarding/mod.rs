//! Onboarding use cases
//!
//! This module contains the first-run wizard flow: step navigation, the
//! draft collected along the way, and the final commit that persists the
//! draft and completes onboarding.

pub mod flow;

pub use flow::{OnboardingCommitError, OnboardingCommitReport, OnboardingFlow, OnboardingProgress};
