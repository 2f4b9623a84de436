//! Auth service port

use async_trait::async_trait;

use crate::auth::Credentials;
use crate::error::BackendError;
use crate::session::Session;

#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Current session. Fails with [`BackendError::Auth`] when absent or expired.
    async fn current_session(&self) -> Result<Session, BackendError>;

    /// Create an account. The backend sends a confirmation email.
    async fn sign_up(&self, credentials: &Credentials) -> Result<(), BackendError>;

    /// Sign in and keep the resulting session as the current one.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, BackendError>;

    /// Drop the current session.
    async fn sign_out(&self) -> Result<(), BackendError>;
}
