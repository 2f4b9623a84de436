use std::sync::Arc;

use crate::deps::AppDeps;
use crate::usecases::{
    CreateGoal, GetDashboard, OnboardingFlow, RegisterAccount, SessionCoordinator, SignIn,
};

/// The application runtime: one coordinator plus accessors for the use cases.
pub struct App {
    deps: AppDeps,
    coordinator: Arc<SessionCoordinator>,
}

impl App {
    /// Create new App instance from dependencies
    ///
    /// This constructor signature IS the dependency manifest.
    pub fn new(deps: AppDeps) -> Self {
        let coordinator = Arc::new(SessionCoordinator::new(
            deps.auth.clone(),
            deps.profiles.clone(),
            deps.app_state_events.clone(),
            deps.onboarding_policy,
        ));
        Self { deps, coordinator }
    }

    pub fn coordinator(&self) -> Arc<SessionCoordinator> {
        self.coordinator.clone()
    }

    pub fn sign_in(&self) -> SignIn {
        SignIn::from_ports(self.deps.auth.clone(), self.coordinator.clone())
    }

    pub fn register_account(&self) -> RegisterAccount {
        RegisterAccount::from_ports(self.deps.auth.clone())
    }

    pub fn create_goal(&self) -> CreateGoal {
        CreateGoal::from_ports(self.deps.auth.clone(), self.deps.goals.clone())
    }

    /// A fresh wizard. Create one each time the onboarding screen opens.
    pub fn onboarding_flow(&self) -> OnboardingFlow {
        OnboardingFlow::new(
            self.coordinator.clone(),
            self.deps.profiles.clone(),
            self.deps.goals.clone(),
        )
    }

    pub fn dashboard(&self) -> GetDashboard {
        GetDashboard::from_ports(self.deps.goals.clone())
    }
}
