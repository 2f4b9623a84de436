use std::sync::Arc;

use tracing::info;

use ems_core::ports::{AuthPort, GoalRepositoryPort};
use ems_core::{BackendError, Goal, GoalError, GoalTitle, ProofType};

#[derive(Debug, thiserror::Error)]
pub enum CreateGoalError {
    #[error("invalid goal: {0}")]
    InvalidTitle(#[from] GoalError),
    #[error("no signed-in user: {0}")]
    Session(#[source] BackendError),
    #[error("failed to save goal: {0}")]
    Insert(#[source] BackendError),
}

/// Use case for creating a goal outside onboarding.
///
/// The owner is always the user of the current session.
pub struct CreateGoal {
    auth: Arc<dyn AuthPort>,
    goals: Arc<dyn GoalRepositoryPort>,
}

impl CreateGoal {
    pub fn new(auth: Arc<dyn AuthPort>, goals: Arc<dyn GoalRepositoryPort>) -> Self {
        Self { auth, goals }
    }

    /// Create a new CreateGoal use case from cloned Arc<dyn Port> references.
    pub fn from_ports(auth: Arc<dyn AuthPort>, goals: Arc<dyn GoalRepositoryPort>) -> Self {
        Self::new(auth, goals)
    }

    /// Validate, build and insert a goal.
    ///
    /// A blank title fails before any port is called.
    #[tracing::instrument(name = "usecase.create_goal.execute", skip_all, fields(proof_type = %proof_type))]
    pub async fn execute(&self, title: &str, proof_type: ProofType) -> Result<Goal, CreateGoalError> {
        let title = GoalTitle::parse(title)?;

        let session = self
            .auth
            .current_session()
            .await
            .map_err(CreateGoalError::Session)?;

        let goal = Goal::build(session.user.id, title, proof_type);
        self.goals
            .insert_goal(&goal)
            .await
            .map_err(CreateGoalError::Insert)?;

        info!(goal_id = %goal.id, user_id = %goal.user_id, "goal created");
        Ok(goal)
    }
}
