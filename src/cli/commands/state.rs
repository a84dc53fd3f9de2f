//! State command implementation

use super::CommandOutcome;
use super::shared::rotation_store;
use crate::cli::args::{StateAction, StateArgs};
use anyhow::{Context, Result};
use colored::*;

/// Run the state command
pub fn run_state(args: &StateArgs) -> Result<CommandOutcome> {
    let store = rotation_store(args.state_file.as_deref())?;

    match args.action {
        StateAction::Show => {
            let state = store.load().with_context(|| {
                format!("Failed to read rotation state from {}", store.path().display())
            })?;
            println!("{}", "Rotation State".bright_green().bold());
            println!("  File:                  {}", store.path().display());
            match &state.last_observation_time {
                Some(time) => {
                    println!("  Information on air:    {}", state.identifier());
                    println!("  Last observation time: {}", time);
                }
                None => println!("  No report generated yet; the next one is Alpha"),
            }
        }
        StateAction::Reset => {
            store.reset().with_context(|| {
                format!("Failed to remove rotation state {}", store.path().display())
            })?;
            println!(
                "{} next report starts at Alpha",
                "Rotation reset:".bright_green().bold()
            );
        }
    }

    Ok(CommandOutcome::Success)
}
