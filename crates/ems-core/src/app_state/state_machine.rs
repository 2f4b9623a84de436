//! App routing state machine.
//!
//! Defines a pure state transition function for the session bootstrap cycle
//! (session check → profile check → route decision) and for onboarding
//! completion.

use serde::Serialize;
use tracing::debug;

use crate::error::BackendError;
use crate::ids::UserId;
use crate::profile::Profile;

/// Why the app routes to the sign-in screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnauthenticatedReason {
    /// The user signed out explicitly.
    SignedOut,
    /// No usable session (absent, expired or network failure).
    NoSession,
    /// Session is valid but there is no profile row for it.
    ProfileNotFound,
    /// Session is valid but the profile could not be loaded.
    ProfileUnavailable,
}

/// Top-level route of the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AppState {
    /// A bootstrap cycle is in flight.
    Loading,
    /// Show the sign-in / registration screen.
    Unauthenticated { reason: UnauthenticatedReason },
    /// Show the onboarding wizard.
    NeedsOnboarding { user_id: UserId },
    /// Show the home tabs.
    Ready { user_id: UserId },
}

impl Default for AppState {
    fn default() -> Self {
        Self::Loading
    }
}

impl AppState {
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::NeedsOnboarding { user_id } | Self::Ready { user_id } => Some(user_id),
            Self::Loading | Self::Unauthenticated { .. } => None,
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated { .. })
    }
}

/// Events that drive the routing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// App start or successful sign-in: (re)start the bootstrap cycle.
    CheckRequested,
    /// Session lookup succeeded.
    SessionResolved { user_id: UserId },
    /// Session lookup failed.
    SessionFailed { error: BackendError },
    /// Profile lookup succeeded.
    ///
    /// `completed_locally` is set when this user finished onboarding earlier
    /// in the same process session, whatever the backend flag says.
    ProfileResolved {
        profile: Profile,
        completed_locally: bool,
    },
    /// Profile lookup failed.
    ProfileFailed { error: BackendError },
    /// The onboarding wizard of `user_id` was committed.
    ///
    /// Only applies while that same user is on the onboarding screen.
    OnboardingCompleted { user_id: UserId },
    /// The user signed out.
    SignedOut,
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Ask the auth service for the current session.
    FetchSession,
    /// Load the profile row of the given user.
    FetchProfile { user_id: UserId },
}

/// Pure routing state machine: no side effects.
pub struct AppStateMachine;

impl AppStateMachine {
    pub fn transition(state: AppState, event: AppEvent) -> (AppState, Vec<AppAction>) {
        match (state, event) {
            (_, AppEvent::CheckRequested) => (AppState::Loading, vec![AppAction::FetchSession]),
            (_, AppEvent::SignedOut) => (
                AppState::Unauthenticated {
                    reason: UnauthenticatedReason::SignedOut,
                },
                Vec::new(),
            ),
            (AppState::Loading, AppEvent::SessionFailed { .. }) => (
                AppState::Unauthenticated {
                    reason: UnauthenticatedReason::NoSession,
                },
                Vec::new(),
            ),
            (AppState::Loading, AppEvent::SessionResolved { user_id }) => {
                (AppState::Loading, vec![AppAction::FetchProfile { user_id }])
            }
            (AppState::Loading, AppEvent::ProfileFailed { error }) => {
                let reason = if error.is_not_found() {
                    UnauthenticatedReason::ProfileNotFound
                } else {
                    UnauthenticatedReason::ProfileUnavailable
                };
                (AppState::Unauthenticated { reason }, Vec::new())
            }
            (
                AppState::Loading,
                AppEvent::ProfileResolved {
                    profile,
                    completed_locally,
                },
            ) => {
                let user_id = profile.id;
                if profile.is_onboarded.is_complete() || completed_locally {
                    (AppState::Ready { user_id }, Vec::new())
                } else {
                    (AppState::NeedsOnboarding { user_id }, Vec::new())
                }
            }
            (
                AppState::NeedsOnboarding { user_id },
                AppEvent::OnboardingCompleted {
                    user_id: completed,
                },
            ) if user_id == completed => (AppState::Ready { user_id }, Vec::new()),
            (state, event) => {
                debug!(?state, ?event, "app state event ignored");
                (state, Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::OnboardingFlag;

    fn profile(id: &str, flag: OnboardingFlag) -> Profile {
        Profile {
            id: UserId::from(id),
            email: None,
            full_name: None,
            username: None,
            avatar_url: None,
            is_onboarded: flag,
            goals_id: None,
        }
    }

    fn resolved(id: &str, flag: OnboardingFlag) -> AppEvent {
        AppEvent::ProfileResolved {
            profile: profile(id, flag),
            completed_locally: false,
        }
    }

    #[test]
    fn check_requested_enters_loading_and_fetches_session() {
        for state in [
            AppState::Loading,
            AppState::Unauthenticated {
                reason: UnauthenticatedReason::NoSession,
            },
            AppState::Ready {
                user_id: UserId::from("U1"),
            },
        ] {
            let (next, actions) = AppStateMachine::transition(state, AppEvent::CheckRequested);
            assert_eq!(next, AppState::Loading);
            assert_eq!(actions, vec![AppAction::FetchSession]);
        }
    }

    #[test]
    fn session_failure_routes_to_unauthenticated() {
        let (next, actions) = AppStateMachine::transition(
            AppState::Loading,
            AppEvent::SessionFailed {
                error: BackendError::Auth("no session".into()),
            },
        );
        assert_eq!(
            next,
            AppState::Unauthenticated {
                reason: UnauthenticatedReason::NoSession
            }
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn session_success_fetches_profile_of_that_user() {
        let (next, actions) = AppStateMachine::transition(
            AppState::Loading,
            AppEvent::SessionResolved {
                user_id: UserId::from("U1"),
            },
        );
        assert_eq!(next, AppState::Loading);
        assert_eq!(
            actions,
            vec![AppAction::FetchProfile {
                user_id: UserId::from("U1")
            }]
        );
    }

    #[test]
    fn profile_flag_decides_route() {
        let (absent, _) =
            AppStateMachine::transition(AppState::Loading, resolved("U1", OnboardingFlag::NotSet));
        let (falsy, _) =
            AppStateMachine::transition(AppState::Loading, resolved("U3", OnboardingFlag::False));
        let (truthy, _) =
            AppStateMachine::transition(AppState::Loading, resolved("U2", OnboardingFlag::True));

        assert_eq!(
            absent,
            AppState::NeedsOnboarding {
                user_id: UserId::from("U1")
            }
        );
        assert_eq!(
            falsy,
            AppState::NeedsOnboarding {
                user_id: UserId::from("U3")
            }
        );
        assert_eq!(
            truthy,
            AppState::Ready {
                user_id: UserId::from("U2")
            }
        );
    }

    #[test]
    fn locally_completed_user_never_reenters_onboarding() {
        let (next, _) = AppStateMachine::transition(
            AppState::Loading,
            AppEvent::ProfileResolved {
                profile: profile("U1", OnboardingFlag::False),
                completed_locally: true,
            },
        );
        assert_eq!(
            next,
            AppState::Ready {
                user_id: UserId::from("U1")
            }
        );
    }

    #[test]
    fn profile_failures_collapse_to_unauthenticated_with_reason() {
        let (not_found, _) = AppStateMachine::transition(
            AppState::Loading,
            AppEvent::ProfileFailed {
                error: BackendError::NotFound("profile".into()),
            },
        );
        let (network, _) = AppStateMachine::transition(
            AppState::Loading,
            AppEvent::ProfileFailed {
                error: BackendError::Network("timeout".into()),
            },
        );
        assert_eq!(
            not_found,
            AppState::Unauthenticated {
                reason: UnauthenticatedReason::ProfileNotFound
            }
        );
        assert_eq!(
            network,
            AppState::Unauthenticated {
                reason: UnauthenticatedReason::ProfileUnavailable
            }
        );
    }

    #[test]
    fn onboarding_completed_moves_to_ready() {
        let (next, actions) = AppStateMachine::transition(
            AppState::NeedsOnboarding {
                user_id: UserId::from("U1"),
            },
            AppEvent::OnboardingCompleted {
                user_id: UserId::from("U1"),
            },
        );
        assert_eq!(
            next,
            AppState::Ready {
                user_id: UserId::from("U1")
            }
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn onboarding_completed_for_another_user_is_ignored() {
        let onboarding_u2 = AppState::NeedsOnboarding {
            user_id: UserId::from("U2"),
        };
        let (next, actions) = AppStateMachine::transition(
            onboarding_u2.clone(),
            AppEvent::OnboardingCompleted {
                user_id: UserId::from("U1"),
            },
        );
        assert_eq!(next, onboarding_u2);
        assert!(actions.is_empty());
    }

    #[test]
    fn stray_events_are_ignored() {
        let ready = AppState::Ready {
            user_id: UserId::from("U2"),
        };
        let (next, actions) =
            AppStateMachine::transition(ready.clone(), resolved("U2", OnboardingFlag::False));
        assert_eq!(next, ready);
        assert!(actions.is_empty());

        let (next, _) = AppStateMachine::transition(
            AppState::Unauthenticated {
                reason: UnauthenticatedReason::NoSession,
            },
            AppEvent::OnboardingCompleted {
                user_id: UserId::from("U1"),
            },
        );
        assert!(next.is_unauthenticated());
    }

    #[test]
    fn sign_out_from_ready() {
        let (next, _) = AppStateMachine::transition(
            AppState::Ready {
                user_id: UserId::from("U2"),
            },
            AppEvent::SignedOut,
        );
        assert_eq!(
            next,
            AppState::Unauthenticated {
                reason: UnauthenticatedReason::SignedOut
            }
        );
    }
}
