use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory is unavailable")]
    DataLocalDirUnavailable,

    #[error("system config directory is unavailable")]
    ConfigDirUnavailable,
}

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored session is corrupt: {0}")]
    Corrupt(String),
}
