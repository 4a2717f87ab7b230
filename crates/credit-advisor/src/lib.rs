//! Credit affordability evaluation with a CSV client directory, an append-only
//! evaluation history and an optional language-model advisor.

pub mod advisor;
pub mod config;
pub mod credit;
pub mod error;
pub mod telemetry;
