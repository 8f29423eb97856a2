//! Campus onboarding — multi-step profile wizard over a managed backend.

pub mod config;
pub mod error;
pub mod location;
pub mod options;
pub mod store;
pub mod wizard;
