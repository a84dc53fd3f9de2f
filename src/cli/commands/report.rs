//! Report command implementation
//!
//! Generates one report, prints it and persists the advanced rotation.

use super::CommandOutcome;
use super::shared::rotation_store;
use crate::app::adapters::http::ReqwestClient;
use crate::app::models::{AtisReport, RotationState, SourceRecord};
use crate::app::services::report_generator::ReportGenerator;
use crate::cli::args::{OutputFormat, ReportArgs};
use crate::config::{AtisConfig, Secrets};
use anyhow::{Context, Result};
use chrono::Utc;
use colored::*;
use tracing::{info, warn};

/// Run the report command
pub async fn run_report(config: AtisConfig, args: &ReportArgs) -> Result<CommandOutcome> {
    let secrets = Secrets::from_env().context("Failed to load provider API keys")?;
    let client = ReqwestClient::new().context("Failed to create HTTP client")?;

    let store = if args.no_state {
        None
    } else {
        Some(rotation_store(args.state_file.as_deref())?)
    };
    let state = match &store {
        Some(store) => store.load().with_context(|| {
            format!("Failed to read rotation state from {}", store.path().display())
        })?,
        None => RotationState::default(),
    };

    let generator = ReportGenerator::new(client, config, Some(secrets));
    let (report, next_state) = generator
        .generate(&state, Utc::now())
        .await
        .context("Report generation failed")?;

    if report.failed {
        warn!("Report generation failed, rotation state left unchanged");
    } else if let Some(store) = &store {
        store.save(&next_state).with_context(|| {
            format!("Failed to save rotation state to {}", store.path().display())
        })?;
        info!("Rotation state saved to {}", store.path().display());
    }

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(if report.failed {
        CommandOutcome::ReportFailed
    } else {
        CommandOutcome::Success
    })
}

fn print_text(report: &AtisReport) {
    if report.failed {
        println!("{}", report.spoken.bright_red().bold());
        print_sources(report);
        return;
    }

    let heading = match report.identifier {
        Some(identifier) => format!("ATIS Information {}", identifier.word()),
        None => "ATIS".to_string(),
    };
    println!("{}", heading.bright_green().bold());
    println!("{}", report.spoken);
    println!();
    println!("{}", "D-ATIS".bright_green().bold());
    println!("{}", report.compact);
    println!();
    print_sources(report);
}

fn print_sources(report: &AtisReport) {
    println!(
        "{} ({}/3 contributing)",
        "Sources".bright_white().bold(),
        report.sources.fetched_count()
    );
    for (name, record) in [
        ("forecast", &report.sources.forecast),
        ("agency", &report.sources.agency),
        ("station", &report.sources.station),
    ] {
        println!("  {:<9} {}", name, describe(record));
    }
}

fn describe(record: &SourceRecord) -> ColoredString {
    match record {
        SourceRecord::Fetched { .. } => "ok".bright_green(),
        SourceRecord::FetchFailed { message } => format!("fetch failed: {}", message).bright_red(),
        SourceRecord::ParseFailed { message } => format!("parse failed: {}", message).yellow(),
        SourceRecord::NotConfigured => "not configured".dimmed(),
    }
}
