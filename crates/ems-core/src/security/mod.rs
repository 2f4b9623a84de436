//! Secret handling for credentials.

pub mod secret;

pub use secret::SecretString;
