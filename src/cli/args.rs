//! Command-line argument definitions for the ATIS generator
//!
//! This module defines the CLI interface using the clap derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the ATIS generator
///
/// Fuses forecast-model, national-agency and local-station weather into the
/// spoken ATIS and compact D-ATIS reports for one aerodrome.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "atis",
    version,
    about = "Generate ATIS and D-ATIS weather reports for a single aerodrome",
    long_about = "Queries a forecast model, the national weather agency and the aerodrome's own \
                  weather station, fuses their observations by precedence and renders a spoken \
                  ATIS broadcast and a compact D-ATIS report. The broadcast identifier advances \
                  whenever the observation time changes."
)]
pub struct Args {
    /// JSON configuration file; defaults are used when omitted
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "JSON configuration file"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress log output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Generate a report from the current provider data
    Report(ReportArgs),
    /// Inspect or reset the persisted broadcast rotation
    State(StateArgs),
    /// Print the effective configuration
    Config,
}

/// Arguments for the report command
#[derive(Debug, Clone, Parser)]
pub struct ReportArgs {
    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "text",
        help = "Output format for the report"
    )]
    pub format: OutputFormat,

    /// Rotation state file
    ///
    /// Defaults to rotation.json in the user data directory.
    #[arg(
        long = "state-file",
        value_name = "FILE",
        help = "File holding the broadcast rotation state"
    )]
    pub state_file: Option<PathBuf>,

    /// Start at Alpha and do not persist the rotation
    #[arg(
        long = "no-state",
        help = "Do not read or write the rotation state",
        conflicts_with = "state_file"
    )]
    pub no_state: bool,
}

/// Arguments for the state command
#[derive(Debug, Clone, Parser)]
pub struct StateArgs {
    #[command(subcommand)]
    pub action: StateAction,

    /// Rotation state file
    #[arg(
        long = "state-file",
        value_name = "FILE",
        global = true,
        help = "File holding the broadcast rotation state"
    )]
    pub state_file: Option<PathBuf>,
}

/// Operations on the persisted rotation state
#[derive(Debug, Clone, Subcommand)]
pub enum StateAction {
    /// Show the identifier currently on air
    Show,
    /// Remove the state so the next report starts at Alpha
    Reset,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Both reports as human-readable text
    Text,
    /// The full report with diagnostics as JSON
    Json,
}

impl Args {
    /// Determine the log level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
