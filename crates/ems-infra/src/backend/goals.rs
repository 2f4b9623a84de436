use async_trait::async_trait;
use reqwest::Method;

use ems_core::ports::GoalRepositoryPort;
use ems_core::{BackendError, Goal, UserId};

use super::error::{check, transport, Endpoint};
use super::{user_filter, RestBackendClient};

const GOALS_PATH: &str = "/rest/v1/goals";

#[async_trait]
impl GoalRepositoryPort for RestBackendClient {
    async fn insert_goal(&self, goal: &Goal) -> Result<(), BackendError> {
        let response = self
            .authorized(Method::POST, GOALS_PATH)
            .await?
            .header("Prefer", "return=minimal")
            .json(goal)
            .send()
            .await
            .map_err(transport)?;

        check(Endpoint::Data, response).await?;
        Ok(())
    }

    async fn list_goals(&self, user_id: &UserId) -> Result<Vec<Goal>, BackendError> {
        let owner_filter = user_filter(user_id);
        let response = self
            .authorized(Method::GET, GOALS_PATH)
            .await?
            .query(&[("select", "*"), ("userId", owner_filter.as_str())])
            .send()
            .await
            .map_err(transport)?;

        check(Endpoint::Data, response)
            .await?
            .json()
            .await
            .map_err(transport)
    }
}
