//! CLI command handling
//!
//! Resolves configuration, runs the journey and formats output.

use std::path::Path;

use crate::client::AuthClient;
use crate::commands::{Commands, TargetArgs};
use crate::common::config::Config;
use crate::common::{paths, Error, Result};
use crate::scenario::{run_journey, RunOptions, RunReport};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            target,
            boundaries,
            json,
        } => {
            let config = resolve_config(&target)?;
            let client = AuthClient::new(&config.service.base_url, config.timeout())?;

            tracing::debug!(base_url = client.base_url(), boundaries, "starting journey");

            let report = run_journey(
                &client,
                &config.credentials,
                RunOptions {
                    boundaries,
                    quiet: json,
                },
            )
            .await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }

            into_result(&report)
        }

        Commands::Config { config, path } => {
            if path {
                match paths::config_path() {
                    Some(p) => println!("{}", p.display()),
                    None => return Err(Error::Config("No config directory on this platform".to_string())),
                }
                return Ok(());
            }

            let config = load_config(config.as_deref())?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Config file values with command line overrides applied
pub fn resolve_config(target: &TargetArgs) -> Result<Config> {
    let mut config = load_config(target.config.as_deref())?;

    if let Some(base_url) = &target.base_url {
        config.service.base_url = base_url.clone();
    }
    if let Some(timeout) = target.timeout {
        config.service.timeout_secs = Some(timeout);
    }
    if let Some(email) = &target.email {
        config.credentials.email = email.clone();
    }
    if let Some(password) = &target.password {
        config.credentials.password = password.clone();
    }
    if let Some(new_password) = &target.new_password {
        config.credentials.new_password = new_password.clone();
    }

    if config.credentials.password == config.credentials.new_password {
        return Err(Error::Config(
            "password and new_password must differ: the journey uses new_password as the wrong password first".to_string(),
        ));
    }

    Ok(config)
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn into_result(report: &RunReport) -> Result<()> {
    match report.failed_step() {
        None => Ok(()),
        Some(failed) => Err(Error::JourneyFailed {
            step: failed.number,
            total: report.steps_total,
            message: failed.detail.clone(),
        }),
    }
}
