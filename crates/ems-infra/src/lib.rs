//! # ems-infra
//!
//! Adapters behind the `ems-core` ports: the REST client for the backend
//! platform, the file-backed session store and the app directory resolver.

pub mod backend;
pub mod fs;
pub mod session_store;

pub use backend::{BackendConfig, RestBackendClient};
pub use fs::DirsAppDirsAdapter;
pub use session_store::FileSessionStore;
