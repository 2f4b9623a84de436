use crate::app_state::AppState;

/// Notifies the rendering layer that the top-level route changed.
#[async_trait::async_trait]
pub trait AppStateEventPort: Send + Sync {
    async fn emit_app_state_changed(&self, state: AppState);
}
