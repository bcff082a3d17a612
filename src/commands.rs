//! CLI command definitions
//!
//! Defines the clap commands for the smoke test CLI.

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the authentication journey against a service
    Run {
        #[command(flatten)]
        target: TargetArgs,

        /// Also check logged-out sessions, the replaced password and
        /// duplicate registration after the journey passes
        #[arg(long)]
        boundaries: bool,

        /// Print a JSON report instead of per-step lines
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// Config file to read instead of the default location
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Only print the default config file location
        #[arg(long)]
        path: bool,
    },
}

/// Service and credential overrides shared by commands
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Base URL of the service (default: http://localhost:5000)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Account email
    #[arg(long)]
    pub email: Option<String>,

    /// Initial password
    #[arg(long)]
    pub password: Option<String>,

    /// Password set through the reset flow
    #[arg(long)]
    pub new_password: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Config file to read instead of the default location
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}
