//! Business logic use cases
//!
//! The session coordinator owns the routing state; every other use case is a
//! short request/response step that either reads that state or asks the
//! coordinator to move it.
//!
//! app start / sign-in
//!        ↓
//! SessionCoordinator::check_auth_status   → Loading → Unauthenticated | NeedsOnboarding | Ready
//!        ↓ (NeedsOnboarding)
//! OnboardingFlow::next … commit           → SessionCoordinator::complete_onboarding → Ready
//!        ↓ (Ready)
//! CreateGoal / GetDashboard

pub mod auth;
pub mod dashboard;
pub mod goals;
pub mod onboarding;
pub mod session;

pub use auth::{RegisterAccount, RegisterError, RegistrationOutcome, SignIn, SignInError};
pub use dashboard::{DashboardSummary, GetDashboard};
pub use goals::{CreateGoal, CreateGoalError};
pub use onboarding::{
    OnboardingCommitError, OnboardingCommitReport, OnboardingFlow, OnboardingProgress,
};
pub use session::{AppContext, CompleteOnboardingError, CycleOutcome, SessionCoordinator};
