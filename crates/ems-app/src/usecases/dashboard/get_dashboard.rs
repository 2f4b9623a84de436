use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use ems_core::ports::GoalRepositoryPort;
use ems_core::{BackendError, Goal, UserId};

const RECENT_GOALS_LIMIT: usize = 3;

/// Numbers and items shown on the home tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub active_goals: usize,
    pub completed_goals: usize,
    /// Most recently created goals, newest first.
    pub recent_goals: Vec<Goal>,
}

impl DashboardSummary {
    /// `goals` must be in creation order, as the backend lists them.
    pub fn from_goals(goals: Vec<Goal>) -> Self {
        let completed_goals = goals.iter().filter(|g| g.is_completed).count();
        let active_goals = goals.len() - completed_goals;
        let recent_goals = goals.into_iter().rev().take(RECENT_GOALS_LIMIT).collect();

        Self {
            active_goals,
            completed_goals,
            recent_goals,
        }
    }
}

pub struct GetDashboard {
    goals: Arc<dyn GoalRepositoryPort>,
}

impl GetDashboard {
    pub fn new(goals: Arc<dyn GoalRepositoryPort>) -> Self {
        Self { goals }
    }

    pub fn from_ports(goals: Arc<dyn GoalRepositoryPort>) -> Self {
        Self::new(goals)
    }

    #[tracing::instrument(name = "usecase.get_dashboard.execute", skip_all, fields(user_id = %user_id))]
    pub async fn execute(&self, user_id: &UserId) -> Result<DashboardSummary, BackendError> {
        let goals = self.goals.list_goals(user_id).await?;
        debug!(count = goals.len(), "goals listed");
        Ok(DashboardSummary::from_goals(goals))
    }
}
