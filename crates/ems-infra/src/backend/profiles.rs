use async_trait::async_trait;
use reqwest::Method;

use ems_core::ports::ProfileRepositoryPort;
use ems_core::{BackendError, Profile, ProfilePatch, UserId};

use super::error::{check, transport, Endpoint};
use super::{user_filter, RestBackendClient};

const PROFILES_PATH: &str = "/rest/v1/profiles";

#[async_trait]
impl ProfileRepositoryPort for RestBackendClient {
    async fn get_profile(&self, user_id: &UserId) -> Result<Profile, BackendError> {
        let id_filter = user_filter(user_id);
        let response = self
            .authorized(Method::GET, PROFILES_PATH)
            .await?
            .query(&[("select", "*"), ("id", id_filter.as_str())])
            .send()
            .await
            .map_err(transport)?;

        let rows: Vec<Profile> = check(Endpoint::Data, response)
            .await?
            .json()
            .await
            .map_err(transport)?;

        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(format!("profile {user_id}")))
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        patch: &ProfilePatch,
    ) -> Result<(), BackendError> {
        let id_filter = user_filter(user_id);
        let response = self
            .authorized(Method::PATCH, PROFILES_PATH)
            .await?
            .query(&[("id", id_filter.as_str())])
            .json(patch)
            .send()
            .await
            .map_err(transport)?;

        check(Endpoint::Data, response).await?;
        Ok(())
    }
}
