use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use ems_core::auth::Credentials;
use ems_core::ports::AuthPort;
use ems_core::session::{SessionToken, SessionUser};
use ems_core::{BackendError, Session};

use super::error::{check, transport, Endpoint};
use super::RestBackendClient;

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: SessionUser,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| Utc::now().timestamp() + secs));
        Session {
            access_token: SessionToken::new(self.access_token),
            refresh_token: self.refresh_token.map(SessionToken::new),
            expires_at,
            user: self.user,
        }
    }
}

impl RestBackendClient {
    /// Current session, refreshed when its access token has expired.
    pub(crate) async fn valid_session(&self) -> Result<Session, BackendError> {
        let session = self
            .stored_session()
            .await
            .ok_or_else(|| BackendError::Auth("no active session".to_string()))?;

        if !session.is_expired_at(Utc::now()) {
            return Ok(session);
        }

        let _refresh_guard = self.refresh_lock.lock().await;
        // Another request may have refreshed (or dropped) the session while we waited.
        let session = self
            .stored_session()
            .await
            .ok_or_else(|| BackendError::Auth("no active session".to_string()))?;
        if !session.is_expired_at(Utc::now()) {
            return Ok(session);
        }

        let Some(refresh_token) = session.refresh_token.as_ref() else {
            self.forget().await;
            return Err(BackendError::Auth("session expired".to_string()));
        };

        debug!(user_id = %session.user_id(), "access token expired, refreshing");
        match self.refresh(refresh_token).await {
            Ok(refreshed) => {
                self.remember(&refreshed).await;
                Ok(refreshed)
            }
            Err(err) if err.is_auth() => {
                warn!(error = %err, "refresh token rejected, dropping session");
                self.forget().await;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    async fn refresh(&self, refresh_token: &SessionToken) -> Result<Session, BackendError> {
        let response = self
            .request(Method::POST, "/auth/v1/token")
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshGrant {
                refresh_token: refresh_token.expose(),
            })
            .send()
            .await
            .map_err(transport)?;

        let token: TokenResponse = check(Endpoint::Auth, response)
            .await?
            .json()
            .await
            .map_err(transport)?;
        Ok(token.into_session())
    }
}

#[async_trait]
impl AuthPort for RestBackendClient {
    async fn current_session(&self) -> Result<Session, BackendError> {
        self.valid_session().await
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<(), BackendError> {
        let response = self
            .request(Method::POST, "/auth/v1/signup")
            .json(&PasswordGrant {
                email: &credentials.email,
                password: credentials.password.expose(),
            })
            .send()
            .await
            .map_err(transport)?;

        check(Endpoint::SignUp, response).await?;
        info!("sign-up accepted, awaiting email confirmation");
        Ok(())
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, BackendError> {
        let response = self
            .request(Method::POST, "/auth/v1/token")
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant {
                email: &credentials.email,
                password: credentials.password.expose(),
            })
            .send()
            .await
            .map_err(transport)?;

        let token: TokenResponse = check(Endpoint::Auth, response)
            .await?
            .json()
            .await
            .map_err(transport)?;
        let session = token.into_session();

        self.remember(&session).await;
        info!(user_id = %session.user_id(), "session established");
        Ok(session)
    }

    /// The local session is dropped even when the server call fails.
    async fn sign_out(&self) -> Result<(), BackendError> {
        let session = self.stored_session().await;
        self.forget().await;

        let Some(session) = session else {
            return Ok(());
        };

        let response = self
            .request(Method::POST, "/auth/v1/logout")
            .bearer_auth(session.access_token.expose())
            .send()
            .await
            .map_err(transport)?;
        check(Endpoint::Auth, response).await?;
        Ok(())
    }
}
