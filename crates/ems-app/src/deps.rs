//! # Application Dependencies
//!
//! This module defines the dependency grouping for App construction.
//!
//! **Note**: This is NOT a Builder pattern.
//! - No build steps
//! - No default values
//! - No hidden logic
//! - Just parameter grouping

use std::sync::Arc;

use ems_core::ports::{AppStateEventPort, AuthPort, GoalRepositoryPort, ProfileRepositoryPort};

/// What happens when the onboarding flag cannot be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OnboardingPolicy {
    /// `false` (default): log the failure and advance to Ready anyway.
    /// `true`: report the failure and stay on the wizard.
    pub block_on_write_failure: bool,
}

/// Application dependency grouping (non-Builder, just parameter grouping)
///
/// All dependencies are required - no defaults, no optional fields.
pub struct AppDeps {
    // Backend client facade
    pub auth: Arc<dyn AuthPort>,
    pub profiles: Arc<dyn ProfileRepositoryPort>,
    pub goals: Arc<dyn GoalRepositoryPort>,

    // Rendering layer
    pub app_state_events: Arc<dyn AppStateEventPort>,

    pub onboarding_policy: OnboardingPolicy,
}
