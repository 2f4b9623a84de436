//! Session persistence port
//!
//! This port defines the contract for keeping the signed-in session across
//! app restarts. Implementations are provided by the infrastructure layer
//! (e.g., file-based storage).

use async_trait::async_trait;

use crate::ports::errors::SessionStoreError;
use crate::session::Session;

#[async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Stored session, or `None` when nobody is signed in.
    async fn load(&self) -> Result<Option<Session>, SessionStoreError>;

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    async fn clear(&self) -> Result<(), SessionStoreError>;
}
