//! Goal data port

use async_trait::async_trait;

use crate::error::BackendError;
use crate::goal::Goal;
use crate::ids::UserId;

#[async_trait]
pub trait GoalRepositoryPort: Send + Sync {
    async fn insert_goal(&self, goal: &Goal) -> Result<(), BackendError>;

    async fn list_goals(&self, user_id: &UserId) -> Result<Vec<Goal>, BackendError>;
}
