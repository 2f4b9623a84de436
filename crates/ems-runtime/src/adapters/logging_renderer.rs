//! Headless renderer for the routing state.
//!
//! Logs every route change and republishes it on a `watch` channel, so the
//! run loop (or a test) can wait for the next screen without polling.

use async_trait::async_trait;
use tokio::sync::watch;

use ems_core::ports::AppStateEventPort;
use ems_core::AppState;

pub struct LoggingRenderer {
    sender: watch::Sender<AppState>,
}

impl LoggingRenderer {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(AppState::default());
        Self { sender }
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.sender.subscribe()
    }

    /// Last state that was rendered.
    pub fn current(&self) -> AppState {
        self.sender.borrow().clone()
    }
}

impl Default for LoggingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppStateEventPort for LoggingRenderer {
    async fn emit_app_state_changed(&self, state: AppState) {
        tracing::info!(state = ?state, "Route changed");
        self.sender.send_replace(state);
    }
}
