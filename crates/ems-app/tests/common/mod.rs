//! Recording fakes for the backend ports, shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use ems_app::{App, AppDeps, OnboardingPolicy};
use ems_core::auth::Credentials;
use ems_core::ports::{AppStateEventPort, AuthPort, GoalRepositoryPort, ProfileRepositoryPort};
use ems_core::session::{SessionToken, SessionUser};
use ems_core::{
    AppState, BackendError, Goal, OnboardingFlag, Profile, ProfilePatch, Session, UserId,
};

pub fn session_for(id: &str) -> Session {
    Session {
        access_token: SessionToken::new(format!("access-{id}")),
        refresh_token: Some(SessionToken::new(format!("refresh-{id}"))),
        expires_at: None,
        user: SessionUser {
            id: UserId::from(id),
            email: Some(format!("{}@example.com", id.to_lowercase())),
        },
    }
}

pub fn profile_for(id: &str, flag: OnboardingFlag) -> Profile {
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

/// One scripted answer to `current_session`.
pub struct SessionReply {
    pub result: Result<Session, BackendError>,
    /// When set, the call signals `entered` and then waits on this gate.
    pub gate: Option<Arc<Notify>>,
}

impl SessionReply {
    pub fn ok(id: &str) -> Self {
        Self {
            result: Ok(session_for(id)),
            gate: None,
        }
    }

    pub fn err(error: BackendError) -> Self {
        Self {
            result: Err(error),
            gate: None,
        }
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

/// Auth fake. `current_session` answers from a script, falling back to the
/// last signed-in session when the script is empty.
#[derive(Default)]
pub struct FakeAuth {
    pub replies: Mutex<VecDeque<SessionReply>>,
    pub signed_in: Mutex<Option<Session>>,
    pub sign_in_result: Mutex<Option<Result<Session, BackendError>>>,
    pub entered: Notify,
    pub session_calls: AtomicUsize,
    pub sign_out_calls: AtomicUsize,
}

impl FakeAuth {
    pub async fn script(&self, reply: SessionReply) {
        self.replies.lock().await.push_back(reply);
    }

    pub fn session_calls(&self) -> usize {
        self.session_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthPort for FakeAuth {
    async fn current_session(&self) -> Result<Session, BackendError> {
        self.session_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.lock().await.pop_front();
        match reply {
            Some(SessionReply { result, gate }) => {
                if let Some(gate) = gate {
                    self.entered.notify_one();
                    gate.notified().await;
                }
                result
            }
            None => self
                .signed_in
                .lock()
                .await
                .clone()
                .ok_or_else(|| BackendError::Auth("no session".into())),
        }
    }

    async fn sign_up(&self, _credentials: &Credentials) -> Result<(), BackendError> {
        Ok(())
    }

    async fn sign_in(&self, _credentials: &Credentials) -> Result<Session, BackendError> {
        let result = self
            .sign_in_result
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| Err(BackendError::Auth("invalid login credentials".into())));
        if let Ok(session) = &result {
            *self.signed_in.lock().await = Some(session.clone());
        }
        result
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        *self.signed_in.lock().await = None;
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeProfiles {
    pub rows: Mutex<HashMap<UserId, Profile>>,
    pub fetch_error: Mutex<Option<BackendError>>,
    pub update_error: Mutex<Option<BackendError>>,
    pub patches: Mutex<Vec<(UserId, ProfilePatch)>>,
    pub fetch_calls: AtomicUsize,
    /// When set, the next `update_profile` signals `update_entered` and waits on it.
    pub update_gate: Mutex<Option<Arc<Notify>>>,
    pub update_entered: Notify,
}

impl FakeProfiles {
    pub async fn insert(&self, profile: Profile) {
        self.rows.lock().await.insert(profile.id.clone(), profile);
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub async fn gate_next_update(&self, gate: Arc<Notify>) {
        *self.update_gate.lock().await = Some(gate);
    }

    pub async fn patched_users(&self) -> Vec<UserId> {
        self.patches
            .lock()
            .await
            .iter()
            .map(|(user_id, _)| user_id.clone())
            .collect()
    }
}

#[async_trait]
impl ProfileRepositoryPort for FakeProfiles {
    async fn get_profile(&self, user_id: &UserId) -> Result<Profile, BackendError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fetch_error.lock().await.clone() {
            return Err(err);
        }
        self.rows
            .lock()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("profile {user_id}")))
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        patch: &ProfilePatch,
    ) -> Result<(), BackendError> {
        self.patches
            .lock()
            .await
            .push((user_id.clone(), patch.clone()));
        let gate = self.update_gate.lock().await.take();
        if let Some(gate) = gate {
            self.update_entered.notify_one();
            gate.notified().await;
        }
        if let Some(err) = self.update_error.lock().await.clone() {
            return Err(err);
        }
        if let Some(row) = self.rows.lock().await.get_mut(user_id) {
            if let Some(flag) = patch.is_onboarded {
                row.is_onboarded = Some(flag).into();
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeGoals {
    pub inserted: Mutex<Vec<Goal>>,
    /// Titles whose insert fails.
    pub failing_titles: Mutex<Vec<String>>,
}

#[async_trait]
impl GoalRepositoryPort for FakeGoals {
    async fn insert_goal(&self, goal: &Goal) -> Result<(), BackendError> {
        if self.failing_titles.lock().await.contains(&goal.title) {
            return Err(BackendError::Network("insert failed".into()));
        }
        self.inserted.lock().await.push(goal.clone());
        Ok(())
    }

    async fn list_goals(&self, user_id: &UserId) -> Result<Vec<Goal>, BackendError> {
        Ok(self
            .inserted
            .lock()
            .await
            .iter()
            .filter(|g| &g.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct RecordingEvents {
    pub states: Mutex<Vec<AppState>>,
}

#[async_trait]
impl AppStateEventPort for RecordingEvents {
    async fn emit_app_state_changed(&self, state: AppState) {
        self.states.lock().await.push(state);
    }
}

pub struct Fixture {
    pub auth: Arc<FakeAuth>,
    pub profiles: Arc<FakeProfiles>,
    pub goals: Arc<FakeGoals>,
    pub events: Arc<RecordingEvents>,
    pub app: App,
}

pub fn fixture() -> Fixture {
    fixture_with_policy(OnboardingPolicy::default())
}

pub fn fixture_with_policy(policy: OnboardingPolicy) -> Fixture {
    let auth = Arc::new(FakeAuth::default());
    let profiles = Arc::new(FakeProfiles::default());
    let goals = Arc::new(FakeGoals::default());
    let events = Arc::new(RecordingEvents::default());

    let app = App::new(AppDeps {
        auth: auth.clone(),
        profiles: profiles.clone(),
        goals: goals.clone(),
        app_state_events: events.clone(),
        onboarding_policy: policy,
    });

    Fixture {
        auth,
        profiles,
        goals,
        events,
        app,
    }
}
