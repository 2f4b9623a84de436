use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use ems_core::auth::{RegistrationError, RegistrationForm};
use ems_core::ports::AuthPort;
use ems_core::BackendError;

/// What the app shows after a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RegistrationOutcome {
    /// The account exists but must be confirmed from the inbox before sign-in.
    ConfirmationEmailSent { email: String },
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error(transparent)]
    Invalid(#[from] RegistrationError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Use case for creating an account.
pub struct RegisterAccount {
    auth: Arc<dyn AuthPort>,
}

impl RegisterAccount {
    pub fn new(auth: Arc<dyn AuthPort>) -> Self {
        Self { auth }
    }

    pub fn from_ports(auth: Arc<dyn AuthPort>) -> Self {
        Self::new(auth)
    }

    /// Validate the form locally, then ask the backend to create the account.
    #[tracing::instrument(name = "usecase.register_account.execute", skip_all)]
    pub async fn execute(&self, form: RegistrationForm) -> Result<RegistrationOutcome, RegisterError> {
        let credentials = form.validate()?;

        self.auth.sign_up(&credentials).await?;

        info!("account created, confirmation email sent");
        Ok(RegistrationOutcome::ConfirmationEmailSent {
            email: credentials.email.clone(),
        })
    }
}
