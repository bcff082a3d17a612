//! Authentication service smoke test
//!
//! Drives a session-based authentication HTTP service through register,
//! login, profile, logout and password reset, asserting on every response.

pub mod cli;
pub mod client;
pub mod commands;
pub mod common;
pub mod scenario;

// Re-export commonly used types for tests
pub use client::{ApiResponse, AuthClient};
pub use common::config::{Config, Credentials};
pub use common::{Error, Result};
pub use scenario::{run_journey, RunOptions, RunReport, Step};
