use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use ems_core::onboarding::{OnboardingAction, OnboardingEvent, ProfileFields};
use ems_core::ports::{GoalRepositoryPort, ProfileRepositoryPort};
use ems_core::{
    AppState, Goal, GoalError, GoalId, GoalTitle, OnboardingDraft, OnboardingStep,
    OnboardingWizard, ProofType, UserId,
};

use crate::usecases::session::{CompleteOnboardingError, SessionCoordinator};

/// Where the wizard is after a navigation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingProgress {
    Step(OnboardingStep),
    Committed(OnboardingCommitReport),
}

/// What the commit managed to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingCommitReport {
    pub final_state: AppState,
    pub profile_saved: bool,
    pub goals_saved: usize,
    pub goals_failed: usize,
    /// Reported to the caller only; there is no backend destination for them.
    pub selected_apps: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum OnboardingCommitError {
    #[error("onboarding is not in progress (current state: {0:?})")]
    NotOnboarding(AppState),
    #[error("invalid goal: {0}")]
    InvalidGoal(#[from] GoalError),
    #[error(transparent)]
    CompleteOnboarding(#[from] CompleteOnboardingError),
}

struct WizardState {
    step: OnboardingStep,
    draft: OnboardingDraft,
}

/// The onboarding wizard of one screen visit.
///
/// Navigation never validates; only [`OnboardingFlow::add_goal`] checks its
/// input, and the commit tolerates partial write failures.
pub struct OnboardingFlow {
    coordinator: Arc<SessionCoordinator>,
    profiles: Arc<dyn ProfileRepositoryPort>,
    goals: Arc<dyn GoalRepositoryPort>,
    wizard: Mutex<WizardState>,
}

impl OnboardingFlow {
    pub fn new(
        coordinator: Arc<SessionCoordinator>,
        profiles: Arc<dyn ProfileRepositoryPort>,
        goals: Arc<dyn GoalRepositoryPort>,
    ) -> Self {
        Self {
            coordinator,
            profiles,
            goals,
            wizard: Mutex::new(WizardState {
                step: OnboardingStep::default(),
                draft: OnboardingDraft::default(),
            }),
        }
    }

    pub async fn current_step(&self) -> OnboardingStep {
        self.wizard.lock().await.step
    }

    /// Snapshot of the collected data.
    pub async fn draft(&self) -> OnboardingDraft {
        self.wizard.lock().await.draft.clone()
    }

    /// Advance one step. On the last step this commits.
    pub async fn next(&self) -> Result<OnboardingProgress, OnboardingCommitError> {
        self.navigate(OnboardingEvent::Next).await
    }

    pub async fn back(&self) -> OnboardingStep {
        let mut wizard = self.wizard.lock().await;
        let (step, _) = OnboardingWizard::transition(wizard.step, OnboardingEvent::Back);
        wizard.step = step;
        step
    }

    /// Commit from the last step. Ignored on earlier steps.
    pub async fn finish(&self) -> Result<OnboardingProgress, OnboardingCommitError> {
        self.navigate(OnboardingEvent::Finish).await
    }

    pub async fn set_profile_fields(&self, fields: ProfileFields) {
        self.wizard.lock().await.draft.profile = fields;
    }

    /// Add a goal owned by the user being onboarded.
    pub async fn add_goal(
        &self,
        title: &str,
        proof_type: ProofType,
    ) -> Result<GoalId, OnboardingCommitError> {
        let title = GoalTitle::parse(title)?;
        let owner = self.onboarding_user().await?;

        let goal = Goal::build(owner, title, proof_type);
        let id = goal.id.clone();
        debug!(goal_id = %id, "goal added to onboarding draft");
        self.wizard.lock().await.draft.add_goal(goal);
        Ok(id)
    }

    pub async fn remove_goal(&self, id: &GoalId) -> bool {
        self.wizard.lock().await.draft.remove_goal(id)
    }

    /// Returns whether the app is selected after the toggle.
    pub async fn toggle_app(&self, app: impl Into<String>) -> bool {
        self.wizard.lock().await.draft.toggle_app(app)
    }

    /// Persist the draft and complete onboarding.
    ///
    /// Profile and goal write failures are logged and counted in the report.
    /// Goals that were saved are dropped from the draft, so a retried commit
    /// only resends the failed ones.
    #[tracing::instrument(name = "usecase.onboarding_flow.commit", skip(self))]
    pub async fn commit(&self) -> Result<OnboardingCommitReport, OnboardingCommitError> {
        let mut wizard = self.wizard.lock().await;
        let user_id = self.onboarding_user().await?;

        let profile_saved = match wizard.draft.profile.to_patch() {
            Some(patch) => match self.profiles.update_profile(&user_id, &patch).await {
                Ok(()) => true,
                Err(err) => {
                    warn!(user_id = %user_id, error = %err, "failed to save onboarding profile fields");
                    false
                }
            },
            None => false,
        };

        let mut failed = Vec::new();
        let mut goals_saved = 0;
        for mut goal in std::mem::take(&mut wizard.draft.goals) {
            goal.user_id = user_id.clone();
            match self.goals.insert_goal(&goal).await {
                Ok(()) => goals_saved += 1,
                Err(err) => {
                    warn!(goal_id = %goal.id, error = %err, "failed to save onboarding goal");
                    failed.push(goal);
                }
            }
        }
        let goals_failed = failed.len();
        wizard.draft.goals = failed;

        let final_state = self.coordinator.complete_onboarding().await?;

        info!(
            user_id = %user_id,
            profile_saved,
            goals_saved,
            goals_failed,
            "onboarding committed"
        );

        Ok(OnboardingCommitReport {
            final_state,
            profile_saved,
            goals_saved,
            goals_failed,
            selected_apps: wizard.draft.selected_apps.iter().cloned().collect(),
        })
    }

    async fn navigate(
        &self,
        event: OnboardingEvent,
    ) -> Result<OnboardingProgress, OnboardingCommitError> {
        let actions = {
            let mut wizard = self.wizard.lock().await;
            let (step, actions) = OnboardingWizard::transition(wizard.step, event);
            wizard.step = step;
            actions
        };

        if actions.contains(&OnboardingAction::Commit) {
            return Ok(OnboardingProgress::Committed(self.commit().await?));
        }
        Ok(OnboardingProgress::Step(self.current_step().await))
    }

    async fn onboarding_user(&self) -> Result<UserId, OnboardingCommitError> {
        match self.coordinator.current_state().await {
            AppState::NeedsOnboarding { user_id } => Ok(user_id),
            other => Err(OnboardingCommitError::NotOnboarding(other)),
        }
    }
}
