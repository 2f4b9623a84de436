use std::collections::HashSet;

use ems_core::{AppState, UserId};
use tokio::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

/// Shared routing context: current state, dispatch lock and bootstrap cycle bookkeeping.
///
/// ## Lock Ordering
/// When acquiring several locks, acquire `dispatch_lock` first.
/// - `dispatch_lock`: serializes transitions and cycle rotation, so a stale
///   cycle can never write after a newer one started.
/// - `state`: used for both reading (`get_state`) and writing (during dispatch).
pub struct AppContext {
    state: Mutex<AppState>,
    dispatch_lock: Mutex<()>,
    /// Token of the bootstrap cycle currently allowed to write state.
    cycle: Mutex<CancellationToken>,
    cycle_generation: Mutex<u64>,
    /// Bumped on every sign-out; work started under an older value is stale.
    session_epoch: Mutex<u64>,
    /// Users who finished onboarding during this process session.
    completed_locally: Mutex<HashSet<UserId>>,
}

impl AppContext {
    pub fn new(initial_state: AppState) -> Self {
        Self {
            state: Mutex::new(initial_state),
            dispatch_lock: Mutex::new(()),
            cycle: Mutex::new(CancellationToken::new()),
            cycle_generation: Mutex::new(0),
            session_epoch: Mutex::new(0),
            completed_locally: Mutex::new(HashSet::new()),
        }
    }

    /// Lightweight read that does NOT acquire `dispatch_lock`.
    pub async fn get_state(&self) -> AppState {
        self.state.lock().await.clone()
    }

    pub async fn acquire_dispatch_lock(&self) -> MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn set_state(&self, state: AppState) {
        *self.state.lock().await = state;
    }

    /// Cancel the running cycle and hand out the token of a new one.
    ///
    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn rotate_cycle(&self) -> (u64, CancellationToken) {
        let mut current = self.cycle.lock().await;
        current.cancel();
        let token = CancellationToken::new();
        *current = token.clone();

        let mut generation = self.cycle_generation.lock().await;
        *generation += 1;
        (*generation, token)
    }

    /// Cancel the running cycle without starting another one.
    pub async fn cancel_cycle(&self) {
        self.cycle.lock().await.cancel();
    }

    pub async fn session_epoch(&self) -> u64 {
        *self.session_epoch.lock().await
    }

    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn advance_session_epoch(&self) -> u64 {
        let mut epoch = self.session_epoch.lock().await;
        *epoch += 1;
        *epoch
    }

    pub async fn mark_completed_locally(&self, user_id: UserId) {
        self.completed_locally.lock().await.insert(user_id);
    }

    pub async fn is_completed_locally(&self, user_id: &UserId) -> bool {
        self.completed_locally.lock().await.contains(user_id)
    }

    pub async fn forget_completed_users(&self) {
        self.completed_locally.lock().await.clear();
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(AppState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rotate_cycle_cancels_previous_token() {
        let context = AppContext::default();
        let (first_gen, first) = context.rotate_cycle().await;
        let (second_gen, second) = context.rotate_cycle().await;

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_eq!(second_gen, first_gen + 1);
    }

    #[tokio::test]
    async fn completed_users_are_remembered_until_forgotten() {
        let context = AppContext::default();
        let user = UserId::from("U1");

        assert!(!context.is_completed_locally(&user).await);
        context.mark_completed_locally(user.clone()).await;
        assert!(context.is_completed_locally(&user).await);
        context.forget_completed_users().await;
        assert!(!context.is_completed_locally(&user).await);
    }

    #[tokio::test]
    async fn session_epoch_advances_on_demand() {
        let context = AppContext::default();
        let before = context.session_epoch().await;

        let after = context.advance_session_epoch().await;

        assert_eq!(after, before + 1);
        assert_eq!(context.session_epoch().await, after);
    }
}
