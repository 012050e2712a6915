//! Cost-of-vacancy and delegated-recruitment savings estimates for restaurant positions.

pub mod config;
pub mod error;
pub mod savings;
pub mod telemetry;
