pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config_path};
pub use run::{load_startup_config, run_app, StartupReport};
pub use wiring::{create_app, wire_dependencies, WiringError};
