//! Home tab read models.

pub mod get_dashboard;

pub use get_dashboard::{DashboardSummary, GetDashboard};
