//! Command implementations for the ATIS CLI
//!
//! Each command lives in its own module:
//! - `report`: generate a report and advance the persisted rotation
//! - `state`: inspect or reset the rotation state
//! - `config`: print the effective configuration

pub mod config;
pub mod report;
pub mod shared;
pub mod state;

use crate::cli::args::{Args, Commands};
use anyhow::Result;

/// How a command finished, mapped to the process exit code by `main`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    /// A report was produced but generation failed
    ReportFailed,
}

impl CommandOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandOutcome::Success => 0,
            CommandOutcome::ReportFailed => 1,
        }
    }
}

/// Main command runner, dispatching to the selected subcommand
pub async fn run(args: Args) -> Result<CommandOutcome> {
    shared::setup_logging(&args)?;
    let config = shared::load_config(args.config_file.as_deref())?;

    match &args.command {
        Commands::Report(report_args) => report::run_report(config, report_args).await,
        Commands::State(state_args) => state::run_state(state_args),
        Commands::Config => config::run_config(&config),
    }
}
