//! Profile data port

use async_trait::async_trait;

use crate::error::BackendError;
use crate::ids::UserId;
use crate::profile::{Profile, ProfilePatch};

#[async_trait]
pub trait ProfileRepositoryPort: Send + Sync {
    /// Fails with [`BackendError::NotFound`] when the row does not exist.
    async fn get_profile(&self, user_id: &UserId) -> Result<Profile, BackendError>;

    /// Partial update keyed by `user_id`.
    async fn update_profile(
        &self,
        user_id: &UserId,
        patch: &ProfilePatch,
    ) -> Result<(), BackendError>;
}
