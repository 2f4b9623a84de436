//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. Together, [`AuthPort`],
//! [`ProfileRepositoryPort`] and [`GoalRepositoryPort`] form the backend
//! client facade: the app layer never sees HTTP, only these traits.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port to `ems-core/ports`, ask yourself three questions:
//!
//! 1. **Does this port represent a business capability?**
//! 2. **Will it be depended upon by multiple use cases?**
//! 3. **Is it implemented by the infrastructure or runtime layer?**
//!
//! If all three answers are **yes**, place it here.

pub mod app_dirs;
pub mod app_state_event;
pub mod auth;
pub mod errors;
pub mod goal_repository;
pub mod profile_repository;
pub mod session_store;

pub use app_dirs::AppDirsPort;
pub use app_state_event::AppStateEventPort;
pub use auth::AuthPort;
pub use errors::{AppDirsError, SessionStoreError};
pub use goal_repository::GoalRepositoryPort;
pub use profile_repository::ProfileRepositoryPort;
pub use session_store::SessionStorePort;
