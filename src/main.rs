//! Repominer CLI entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use repominer::{MinerConfig, MiningError, OperationMode};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), MiningError> {
    let config = load_config()?;
    config.validate()?;

    match config.operation_mode() {
        OperationMode::BranchAnalysis => cli::branch_analysis::run(&config).await,
        OperationMode::RepositoryShortlist => cli::shortlist::run(&config).await,
        OperationMode::Unconfigured => Err(MiningError::Configuration {
            message: "nothing to do: set --owner, --repo and --branch to analyse a branch, \
                      or --organisation to shortlist repositories"
                .to_owned(),
        }),
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`MiningError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<MinerConfig, MiningError> {
    MinerConfig::load().map_err(|error| MiningError::Configuration {
        message: error.to_string(),
    })
}
