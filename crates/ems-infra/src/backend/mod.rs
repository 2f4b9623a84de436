//! REST client for the hosted backend platform.
//!
//! One [`RestBackendClient`] implements the whole backend facade:
//! [`AuthPort`](ems_core::ports::AuthPort) against the auth service and
//! [`ProfileRepositoryPort`](ems_core::ports::ProfileRepositoryPort) /
//! [`GoalRepositoryPort`](ems_core::ports::GoalRepositoryPort) against the
//! data API. The current session is cached in memory and mirrored to a
//! [`SessionStorePort`].

mod auth;
pub(crate) mod error;
mod goals;
mod profiles;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use tokio::sync::{Mutex, RwLock};
use tracing::warn;

use ems_core::ports::SessionStorePort;
use ems_core::{AppConfig, BackendError, Session, UserId};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Equality filter on a user id column. Every table is filtered on the lowercase id.
fn user_filter(user_id: &UserId) -> String {
    format!("eq.{}", user_id.normalized())
}

/// Connection settings for the backend platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub anon_key: String,
    pub request_timeout: Duration,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// A timeout of 0 in the config means "use the default".
    pub fn from_app_config(config: &AppConfig) -> Self {
        let request_timeout = match config.request_timeout_secs {
            0 => DEFAULT_REQUEST_TIMEOUT,
            secs => Duration::from_secs(secs),
        };
        Self {
            request_timeout,
            ..Self::new(config.backend_url.clone(), config.backend_anon_key.clone())
        }
    }
}

pub struct RestBackendClient {
    http: reqwest::Client,
    config: BackendConfig,
    session_store: Arc<dyn SessionStorePort>,
    /// `None` until the store was read once.
    cached: RwLock<Option<Option<Session>>>,
    /// Held for the whole token refresh; refresh tokens are single use.
    refresh_lock: Mutex<()>,
}

impl RestBackendClient {
    pub fn new(
        config: BackendConfig,
        session_store: Arc<dyn SessionStorePort>,
    ) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(error::transport)?;

        Ok(Self {
            http,
            config,
            session_store,
            cached: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Request carrying only the project key.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header("apikey", &self.config.anon_key)
    }

    /// Data API request authorized with the current session.
    async fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, BackendError> {
        let session = self.valid_session().await?;
        Ok(self
            .request(method, path)
            .bearer_auth(session.access_token.expose()))
    }

    /// Cached session, loading it from the store on first use.
    ///
    /// A store that cannot be read counts as "signed out".
    async fn stored_session(&self) -> Option<Session> {
        if let Some(cached) = self.cached.read().await.as_ref() {
            return cached.clone();
        }

        let mut cached = self.cached.write().await;
        if let Some(loaded) = cached.as_ref() {
            return loaded.clone();
        }
        let loaded = match self.session_store.load().await {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "failed to read stored session, treating as signed out");
                None
            }
        };
        *cached = Some(loaded.clone());
        loaded
    }

    async fn remember(&self, session: &Session) {
        *self.cached.write().await = Some(Some(session.clone()));
        if let Err(err) = self.session_store.save(session).await {
            warn!(error = %err, "failed to persist session");
        }
    }

    async fn forget(&self) {
        *self.cached.write().await = Some(None);
        if let Err(err) = self.session_store.clear().await {
            warn!(error = %err, "failed to clear stored session");
        }
    }
}
