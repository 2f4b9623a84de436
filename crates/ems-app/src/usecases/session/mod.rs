//! Session bootstrap and routing.

pub mod context;
pub mod coordinator;

pub use context::AppContext;
pub use coordinator::{CompleteOnboardingError, CycleOutcome, SessionCoordinator};
