//! Config command implementation

use super::CommandOutcome;
use crate::config::AtisConfig;
use anyhow::Result;

/// Print the effective configuration as JSON
pub fn run_config(config: &AtisConfig) -> Result<CommandOutcome> {
    config.validate()?;
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(CommandOutcome::Success)
}
