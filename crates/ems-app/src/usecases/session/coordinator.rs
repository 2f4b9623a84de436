//! Session coordinator.
//!
//! This module drives the routing state machine: it runs bootstrap cycles
//! against the backend ports and applies onboarding completion.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

use ems_core::{
    ports::{AppStateEventPort, AuthPort, ProfileRepositoryPort},
    AppAction, AppEvent, AppState, AppStateMachine, BackendError, ProfilePatch,
};

use crate::deps::OnboardingPolicy;
use crate::usecases::session::context::AppContext;

/// Result of one bootstrap cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The cycle ran to completion and left the app in this state.
    Settled(AppState),
    /// A newer cycle (or a sign-out) started first; nothing was written.
    Superseded,
}

impl CycleOutcome {
    pub fn state(&self) -> Option<&AppState> {
        match self {
            Self::Settled(state) => Some(state),
            Self::Superseded => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompleteOnboardingError {
    #[error("onboarding can only be completed from the onboarding screen (current state: {0:?})")]
    NotOnboarding(AppState),
    #[error("failed to persist onboarding flag: {0}")]
    ProfileUpdate(#[source] BackendError),
}

/// Owns the routing state and the bootstrap cycle.
pub struct SessionCoordinator {
    context: Arc<AppContext>,
    auth: Arc<dyn AuthPort>,
    profiles: Arc<dyn ProfileRepositoryPort>,
    events: Arc<dyn AppStateEventPort>,
    policy: OnboardingPolicy,
}

impl SessionCoordinator {
    pub fn new(
        auth: Arc<dyn AuthPort>,
        profiles: Arc<dyn ProfileRepositoryPort>,
        events: Arc<dyn AppStateEventPort>,
        policy: OnboardingPolicy,
    ) -> Self {
        Self {
            context: Arc::new(AppContext::default()),
            auth,
            profiles,
            events,
            policy,
        }
    }

    pub async fn current_state(&self) -> AppState {
        self.context.get_state().await
    }

    /// Run one bootstrap cycle: session check → profile check → route.
    ///
    /// Starting a cycle supersedes any cycle still in flight. The superseded
    /// cycle stops at its next suspension point and never writes state.
    pub async fn check_auth_status(&self) -> CycleOutcome {
        let (generation, token, mut pending) = self.start_cycle().await;

        let span = info_span!("usecase.session_coordinator.check_auth_status", cycle = generation);
        async {
            let mut settled = AppState::Loading;

            while let Some(action) = pending.pop() {
                let event = tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!("bootstrap cycle superseded while waiting on backend");
                        return CycleOutcome::Superseded;
                    }
                    event = self.execute_action(action) => event,
                };

                match self.dispatch_for_cycle(&token, event).await {
                    Some((state, follow_up)) => {
                        settled = state;
                        pending.extend(follow_up);
                    }
                    None => {
                        debug!("bootstrap cycle superseded before applying result");
                        return CycleOutcome::Superseded;
                    }
                }
            }

            info!(state = ?settled, "bootstrap cycle settled");
            CycleOutcome::Settled(settled)
        }
        .instrument(span)
        .await
    }

    /// Re-entry point after an interactive sign-in.
    pub async fn on_login_succeeded(&self) -> CycleOutcome {
        info!("login succeeded, re-checking auth status");
        self.check_auth_status().await
    }

    /// Flip the onboarding flag of the current user and move to Ready.
    ///
    /// With the default policy a failed write is only logged and the app
    /// advances anyway, leaving the backend flag unset.
    pub async fn complete_onboarding(&self) -> Result<AppState, CompleteOnboardingError> {
        let (user_id, epoch) = {
            let _dispatch_guard = self.context.acquire_dispatch_lock().await;
            match self.context.get_state().await {
                AppState::NeedsOnboarding { user_id } => {
                    (user_id, self.context.session_epoch().await)
                }
                other => return Err(CompleteOnboardingError::NotOnboarding(other)),
            }
        };

        let span = info_span!("usecase.session_coordinator.complete_onboarding", user_id = %user_id);
        async {
            if let Err(err) = self
                .profiles
                .update_profile(&user_id, &ProfilePatch::onboarded())
                .await
            {
                if self.policy.block_on_write_failure {
                    warn!(error = %err, "failed to persist onboarding flag, staying on onboarding");
                    return Err(CompleteOnboardingError::ProfileUpdate(err));
                }
                warn!(error = %err, "failed to persist onboarding flag, advancing anyway");
            }

            let _dispatch_guard = self.context.acquire_dispatch_lock().await;
            if self.context.session_epoch().await != epoch {
                info!("signed out while completing onboarding, completion discarded");
                return Ok(self.context.get_state().await);
            }

            // Recorded even when a newer cycle is in flight, so that cycle routes to Ready.
            self.context.mark_completed_locally(user_id.clone()).await;
            let (next, _) = self
                .transition_locked(AppEvent::OnboardingCompleted { user_id })
                .await;
            Ok(next)
        }
        .instrument(span)
        .await
    }

    /// Drop the session and route to the sign-in screen.
    pub async fn sign_out(&self) -> AppState {
        if let Err(err) = self.auth.sign_out().await {
            warn!(error = %err, "sign-out request failed, clearing local state anyway");
        }
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        self.context.cancel_cycle().await;
        self.context.advance_session_epoch().await;
        self.context.forget_completed_users().await;
        self.transition_locked(AppEvent::SignedOut).await.0
    }

    async fn start_cycle(&self) -> (u64, CancellationToken, Vec<AppAction>) {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let (generation, token) = self.context.rotate_cycle().await;
        let (_, actions) = self.transition_locked(AppEvent::CheckRequested).await;
        (generation, token, actions)
    }

    async fn execute_action(&self, action: AppAction) -> AppEvent {
        match action {
            AppAction::FetchSession => match self.auth.current_session().await {
                Ok(session) => {
                    debug!(user_id = %session.user_id(), "session resolved");
                    AppEvent::SessionResolved {
                        user_id: session.user.id,
                    }
                }
                Err(error) => {
                    info!(error = %error, "no usable session");
                    AppEvent::SessionFailed { error }
                }
            },
            AppAction::FetchProfile { user_id } => match self.profiles.get_profile(&user_id).await {
                Ok(profile) => {
                    debug!(user_id = %user_id, is_onboarded = ?profile.is_onboarded, "profile resolved");
                    // Filled in under the dispatch lock, see `dispatch_for_cycle`.
                    AppEvent::ProfileResolved {
                        profile,
                        completed_locally: false,
                    }
                }
                Err(error) => {
                    warn!(user_id = %user_id, error = %error, "failed to load profile");
                    AppEvent::ProfileFailed { error }
                }
            },
        }
    }

    /// Apply an event on behalf of a bootstrap cycle, unless the cycle was superseded.
    async fn dispatch_for_cycle(
        &self,
        token: &CancellationToken,
        mut event: AppEvent,
    ) -> Option<(AppState, Vec<AppAction>)> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        if token.is_cancelled() {
            return None;
        }
        if let AppEvent::ProfileResolved {
            profile,
            completed_locally,
        } = &mut event
        {
            *completed_locally = self.context.is_completed_locally(&profile.id).await;
        }
        Some(self.transition_locked(event).await)
    }

    /// Caller must hold the dispatch lock.
    async fn transition_locked(&self, event: AppEvent) -> (AppState, Vec<AppAction>) {
        let from = self.context.get_state().await;
        let event_name = format!("{:?}", event);
        let (next, actions) = AppStateMachine::transition(from.clone(), event);
        if next != from {
            info!(from = ?from, to = ?next, event = %event_name, "app state transition");
            self.context.set_state(next.clone()).await;
            self.events.emit_app_state_changed(next.clone()).await;
        }
        (next, actions)
    }
}
