//! Authentication service smoke test CLI
//!
//! Runs the register / login / profile / logout / password reset journey
//! against a running service and exits non-zero on the first deviation.

use auth_smoke::{cli, commands, common::logging};
use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "auth-smoke", about = "End-to-end smoke test for an authentication service")]
#[command(version, long_about = None)]
struct Cli {
    /// Log requests and responses to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.verbose);

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
