//! Authenticated session returned by the auth service.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Bearer token issued by the auth service.
///
/// Cloneable and serializable (the adapter persists it), but never printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Identity part of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
}

/// Credential/identity bundle for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: SessionToken,
    #[serde(default)]
    pub refresh_token: Option<SessionToken>,
    /// Expiry as unix seconds. `None` means the server did not say.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: SessionUser,
}

impl Session {
    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }

    /// Whether the access token is expired at `now`.
    ///
    /// Sessions without an expiry are treated as valid; the server will
    /// reject them if they are not.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now.timestamp() >= expires_at,
            None => false,
        }
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }
}
