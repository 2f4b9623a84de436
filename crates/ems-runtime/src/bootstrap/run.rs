use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tracing::{info, warn};

use ems_app::usecases::{CycleOutcome, DashboardSummary};
use ems_core::app_dirs::AppDirs;
use ems_core::config::AppConfig;
use ems_core::AppState;

use super::config::{load_config, resolve_config_path};
use super::wiring::{create_app, wire_dependencies};
use crate::adapters::LoggingRenderer;

/// What the headless runtime found on startup.
#[derive(Debug, Clone, Serialize)]
pub struct StartupReport {
    pub state: AppState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<DashboardSummary>,
}

/// Load the config file, falling back to system defaults when it does not exist.
pub fn load_startup_config(app_dirs: &AppDirs) -> anyhow::Result<AppConfig> {
    let path = resolve_config_path(app_dirs);
    if !path.exists() {
        warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(AppConfig::with_system_defaults(app_dirs.app_data_root.clone()));
    }
    info!(path = %path.display(), "Loading config");
    load_config(path)
}

/// Wire the app, run one bootstrap cycle and report where it landed.
///
/// When the user is ready, the home tab summary is loaded as well; a failure
/// there is logged and leaves `dashboard` empty.
pub async fn run_app(config: AppConfig, app_dirs: AppDirs) -> anyhow::Result<StartupReport> {
    let renderer = Arc::new(LoggingRenderer::new());
    let deps = wire_dependencies(&config, &app_dirs, renderer.clone())
        .context("Failed to wire dependencies")?;
    let app = create_app(deps);

    let state = match app.coordinator().check_auth_status().await {
        CycleOutcome::Settled(state) => state,
        CycleOutcome::Superseded => renderer.current(),
    };

    let dashboard = match &state {
        AppState::Ready { user_id } => match app.dashboard().execute(user_id).await {
            Ok(summary) => Some(summary),
            Err(err) => {
                warn!(error = %err, "Failed to load dashboard");
                None
            }
        },
        _ => None,
    };

    Ok(StartupReport { state, dashboard })
}
