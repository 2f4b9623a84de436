//! # Dependency Injection
//!
//! ## Responsibilities
//!
//! - Create infra implementations (backend client, session store)
//! - Inject all dependencies into `AppDeps`
//!
//! ## Prohibited
//!
//! - No business logic: routing decisions belong to the session coordinator
//! - No configuration validation beyond filling in path defaults
//!
//! > **This is the only place allowed to depend on ems-infra and ems-app simultaneously.**
//! > The privilege is only for "assembly", not for "decision making".

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use ems_app::{App, AppDeps, OnboardingPolicy};
use ems_core::app_dirs::AppDirs;
use ems_core::config::AppConfig;
use ems_core::ports::AppStateEventPort;
use ems_infra::session_store::file::DEFAULT_SESSION_FILE;
use ems_infra::{BackendConfig, FileSessionStore, RestBackendClient};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Backend is not configured: {0}")]
    BackendConfig(String),

    #[error("Backend client initialization failed: {0}")]
    BackendClientInit(String),
}

/// Session file from config, or `{app data}/session.json` when unset.
fn session_file_path(config: &AppConfig, app_dirs: &AppDirs) -> PathBuf {
    if config.session_file_path.as_os_str().is_empty() {
        app_dirs.app_data_root.join(DEFAULT_SESSION_FILE)
    } else {
        config.session_file_path.clone()
    }
}

/// Build the port implementations and group them for [`App::new`].
pub fn wire_dependencies(
    config: &AppConfig,
    app_dirs: &AppDirs,
    app_state_events: Arc<dyn AppStateEventPort>,
) -> WiringResult<AppDeps> {
    if config.backend_url.trim().is_empty() {
        return Err(WiringError::BackendConfig("[backend] url is empty".to_string()));
    }
    if config.backend_anon_key.trim().is_empty() {
        return Err(WiringError::BackendConfig(
            "[backend] anon_key is empty".to_string(),
        ));
    }

    let session_path = session_file_path(config, app_dirs);
    let session_store = Arc::new(FileSessionStore::new(session_path.clone()));

    let backend_config = BackendConfig::from_app_config(config);
    let backend = Arc::new(
        RestBackendClient::new(backend_config, session_store)
            .map_err(|e| WiringError::BackendClientInit(e.to_string()))?,
    );

    info!(
        backend_url = %config.backend_url,
        session_file = %session_path.display(),
        "Dependencies wired"
    );

    Ok(AppDeps {
        auth: backend.clone(),
        profiles: backend.clone(),
        goals: backend,
        app_state_events,
        onboarding_policy: OnboardingPolicy {
            block_on_write_failure: config.block_onboarding_on_write_failure,
        },
    })
}

/// Create the application from wired dependencies.
pub fn create_app(deps: AppDeps) -> App {
    App::new(deps)
}
