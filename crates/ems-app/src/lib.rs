//! EarnMyScroll Application Orchestration Layer
//!
//! This crate contains the use cases and the session coordinator that decides
//! which top-level screen the app shows.

pub mod app;
pub mod deps;
pub mod usecases;

pub use app::App;
pub use deps::{AppDeps, OnboardingPolicy};
