//! Journey runner
//!
//! Drives the fixed step sequence against one service, printing a line per
//! step and stopping at the first failure.

use colored::Colorize;
use serde::Serialize;

use crate::client::AuthClient;
use crate::common::config::Credentials;
use crate::common::Result;

use super::boundary;
use super::steps::{self, Step};

const JOURNEY_STEPS: usize = 9;
const BOUNDARY_STEPS: usize = 3;

/// Options for a run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Run the boundary checks after the journey passes
    pub boundaries: bool,
    /// Suppress console lines (the caller reports instead)
    pub quiet: bool,
}

/// Outcome of one executed step
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub number: usize,
    pub step: Step,
    pub passed: bool,
    /// Failed because the service answered wrongly, not because it could
    /// not be reached
    pub assertion: bool,
    /// Confirmation on success, diagnostic on failure
    pub detail: String,
}

/// Result of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub base_url: String,
    pub passed: bool,
    pub steps_run: usize,
    pub steps_total: usize,
    pub steps: Vec<StepOutcome>,
    pub error: Option<String>,
}

impl RunReport {
    /// The step that stopped the run, if any
    pub fn failed_step(&self) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| !s.passed)
    }
}

struct Progress {
    quiet: bool,
    steps: Vec<StepOutcome>,
}

impl Progress {
    /// Record a step result and pass it through for `?`
    fn record<T>(&mut self, step: Step, result: Result<T>) -> Result<T> {
        let number = self.steps.len() + 1;

        let outcome = match &result {
            Ok(_) => {
                tracing::info!(step = step.label(), "step passed");
                if !self.quiet {
                    println!("  {} Step {}: {}", "✓".green(), number, step.confirmation());
                }
                StepOutcome {
                    number,
                    step,
                    passed: true,
                    assertion: false,
                    detail: step.confirmation().to_string(),
                }
            }
            Err(e) => {
                tracing::warn!(step = step.label(), error = %e, "step failed");
                if !self.quiet {
                    println!("  {} Step {}: {}", "✗".red(), number, e);
                }
                StepOutcome {
                    number,
                    step,
                    passed: false,
                    assertion: e.is_assertion(),
                    detail: e.to_string(),
                }
            }
        };

        self.steps.push(outcome);
        result
    }
}

/// Run the journey and, if asked, the boundary checks
pub async fn run_journey(
    client: &AuthClient,
    credentials: &Credentials,
    options: RunOptions,
) -> RunReport {
    let steps_total = if options.boundaries {
        JOURNEY_STEPS + BOUNDARY_STEPS
    } else {
        JOURNEY_STEPS
    };

    if !options.quiet {
        println!(
            "\n{} {}",
            "Running Journey:".blue().bold(),
            client.base_url().white().bold()
        );
        println!("\n{}", "Steps:".cyan());
    }

    let mut progress = Progress {
        quiet: options.quiet,
        steps: Vec::with_capacity(steps_total),
    };

    let result = drive(client, credentials, options.boundaries, &mut progress).await;

    let passed = result.is_ok();
    if !options.quiet && passed {
        println!(
            "\n{} {}\n",
            "✓".green().bold(),
            "Journey Passed".green().bold()
        );
    }

    RunReport {
        base_url: client.base_url().to_string(),
        passed,
        steps_run: progress.steps.len(),
        steps_total,
        steps: progress.steps,
        error: result.err().map(|e| e.to_string()),
    }
}

async fn drive(
    client: &AuthClient,
    creds: &Credentials,
    boundaries: bool,
    progress: &mut Progress,
) -> Result<()> {
    progress.record(
        Step::Register,
        steps::register(client, &creds.email, &creds.password).await,
    )?;
    // The new password is still wrong at this point.
    progress.record(
        Step::LoginWrongPassword,
        steps::login_expecting_failure(client, &creds.email, &creds.new_password).await,
    )?;
    progress.record(
        Step::ProfileUnauthenticated,
        steps::profile_unauthenticated(client).await,
    )?;
    let session_id = progress.record(
        Step::Login,
        steps::login(client, Step::Login, &creds.email, &creds.password).await,
    )?;
    progress.record(
        Step::ProfileAuthenticated,
        steps::profile_authenticated(client, &session_id).await,
    )?;
    progress.record(Step::Logout, steps::logout(client, &session_id).await)?;
    let reset_token = progress.record(
        Step::ResetPasswordToken,
        steps::request_password_reset(client, &creds.email).await,
    )?;
    progress.record(
        Step::UpdatePassword,
        steps::update_password(client, &creds.email, reset_token, &creds.new_password).await,
    )?;
    progress.record(
        Step::LoginNewPassword,
        steps::login(
            client,
            Step::LoginNewPassword,
            &creds.email,
            &creds.new_password,
        )
        .await,
    )?;

    if !boundaries {
        return Ok(());
    }

    progress.record(
        Step::ProfileAfterLogout,
        boundary::profile_after_logout(client, &session_id).await,
    )?;
    progress.record(
        Step::LoginOldPassword,
        boundary::login_old_password(client, &creds.email, &creds.password).await,
    )?;
    progress.record(
        Step::DuplicateRegistration,
        boundary::duplicate_registration(client, &creds.email, &creds.password).await,
    )?;

    Ok(())
}
