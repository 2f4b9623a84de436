//! Sign-in and registration use cases.

pub mod register;
pub mod sign_in;

pub use register::{RegisterAccount, RegisterError, RegistrationOutcome};
pub use sign_in::{SignIn, SignInError};
