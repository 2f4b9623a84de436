//! File-based session store
//!
//! Persists the signed-in session as a JSON file in the application data
//! directory, so the app can skip the sign-in screen on the next start.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use ems_core::ports::{SessionStoreError, SessionStorePort};
use ems_core::Session;

pub const DEFAULT_SESSION_FILE: &str = "session.json";

pub struct FileSessionStore {
    session_file_path: PathBuf,
}

impl FileSessionStore {
    /// Create store with custom file path
    pub fn new(session_file_path: PathBuf) -> Self {
        Self { session_file_path }
    }

    /// Create store with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            session_file_path: base_dir.join(DEFAULT_SESSION_FILE),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.session_file_path
    }

    async fn ensure_parent_dir(&self) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.session_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStorePort for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        if !fs::try_exists(&self.session_file_path).await? {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.session_file_path).await?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let session: Session = serde_json::from_str(&content)
            .map_err(|e| SessionStoreError::Corrupt(e.to_string()))?;

        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| SessionStoreError::Corrupt(e.to_string()))?;

        let mut file = fs::File::create(&self.session_file_path).await?;
        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.session_file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
