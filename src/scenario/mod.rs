//! Authentication journey
//!
//! Register, log in, read the profile, log out, reset the password and log
//! in again, asserting on every response along the way. The order is fixed.

pub mod boundary;
mod runner;
pub mod steps;

pub use runner::{run_journey, RunOptions, RunReport, StepOutcome};
pub use steps::{ResetToken, SessionId, Step};
