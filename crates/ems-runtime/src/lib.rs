//! Runtime layer for EarnMyScroll.
//!
//! Everything that needs concrete adapters lives here: config loading,
//! tracing setup, dependency wiring and the headless run loop.

pub mod adapters;
pub mod bootstrap;
