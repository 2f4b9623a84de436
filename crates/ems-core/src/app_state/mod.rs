//! App routing domain module.
//!
//! This module defines the top-level routing state machine: which screen the
//! app shows based on authentication and onboarding status.

pub mod state_machine;

pub use state_machine::{AppAction, AppEvent, AppState, AppStateMachine, UnauthenticatedReason};
