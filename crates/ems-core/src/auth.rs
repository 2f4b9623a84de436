//! Sign-in and registration input.

use thiserror::Error;

use crate::security::SecretString;

/// Email/password pair typed into the sign-in form.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: SecretString::new(password.into()),
        }
    }
}

/// Local validation failures, checked before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Registration form as entered by the user.
#[derive(Debug)]
pub struct RegistrationForm {
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl RegistrationForm {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password.into()),
            confirm_password: SecretString::new(confirm_password.into()),
        }
    }

    /// Validate the form and turn it into credentials for sign-up.
    pub fn validate(self) -> Result<Credentials, RegistrationError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(RegistrationError::EmptyEmail);
        }
        if self.password.is_empty() {
            return Err(RegistrationError::EmptyPassword);
        }
        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }
        Ok(Credentials {
            email: email.to_string(),
            password: SecretString::new(self.password.expose().to_string()),
        })
    }
}
