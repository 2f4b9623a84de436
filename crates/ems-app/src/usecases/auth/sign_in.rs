use std::sync::Arc;

use tracing::{info, warn};

use ems_core::auth::Credentials;
use ems_core::ports::AuthPort;
use ems_core::BackendError;

use crate::usecases::session::{CycleOutcome, SessionCoordinator};

#[derive(Debug, thiserror::Error)]
pub enum SignInError {
    #[error("email and password are required")]
    MissingCredentials,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Interactive email/password sign-in.
///
/// A successful sign-in restarts the bootstrap cycle, which then routes to
/// onboarding or the home tabs.
pub struct SignIn {
    auth: Arc<dyn AuthPort>,
    coordinator: Arc<SessionCoordinator>,
}

impl SignIn {
    pub fn new(auth: Arc<dyn AuthPort>, coordinator: Arc<SessionCoordinator>) -> Self {
        Self { auth, coordinator }
    }

    pub fn from_ports(auth: Arc<dyn AuthPort>, coordinator: Arc<SessionCoordinator>) -> Self {
        Self::new(auth, coordinator)
    }

    #[tracing::instrument(name = "usecase.sign_in.execute", skip_all)]
    pub async fn execute(&self, email: &str, password: &str) -> Result<CycleOutcome, SignInError> {
        let credentials = Credentials::new(email, password);
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(SignInError::MissingCredentials);
        }

        let session = self.auth.sign_in(&credentials).await.map_err(|err| {
            warn!(error = %err, "sign-in rejected");
            err
        })?;
        info!(user_id = %session.user_id(), "signed in");

        Ok(self.coordinator.on_login_succeeded().await)
    }
}
