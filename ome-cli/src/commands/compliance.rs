//! Compliance command handlers
//!
//! Prints device compliance reports for a baseline.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use ome_client::OmeClient;
use ome_core::domain::compliance::{ComplianceStatus, DeviceComplianceReport};

use crate::config::Config;

/// Compliance subcommands
#[derive(Subcommand)]
pub enum ComplianceCommands {
    /// Device compliance report for a baseline
    Report {
        /// Baseline name
        baseline: String,

        /// Only these devices, by name or service tag (comma separated)
        #[arg(long, value_delimiter = ',')]
        devices: Vec<String>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle compliance commands
pub async fn handle_compliance_command(
    command: ComplianceCommands,
    config: &Config,
) -> Result<()> {
    let client = config.client()?;

    match command {
        ComplianceCommands::Report {
            baseline,
            devices,
            json,
        } => report(&client, &baseline, &devices, json).await,
    }
}

async fn report(
    client: &OmeClient,
    baseline_name: &str,
    devices: &[String],
    json: bool,
) -> Result<()> {
    let baseline = client.get_baseline_by_name(baseline_name).await?;
    let reports = client.get_compliance_reports(baseline.id, devices).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if reports.is_empty() {
        println!("{}", "No devices in this report.".yellow());
        return Ok(());
    }

    for device in &reports {
        print_device_report(device);
    }

    Ok(())
}

fn print_device_report(device: &DeviceComplianceReport) {
    println!(
        "{} {} ({})",
        device.service_tag.bold(),
        device.device_name.as_deref().unwrap_or("-"),
        device.device_model.as_deref().unwrap_or("unknown model")
    );
    println!("  Status: {}", device.firmware_status);

    for component in &device.components {
        let action = match component.update_action {
            ComplianceStatus::Compliant => component.update_action.as_str().green(),
            ComplianceStatus::Upgrade => component.update_action.as_str().yellow(),
            ComplianceStatus::Downgrade => component.update_action.as_str().red(),
            ComplianceStatus::Unknown => component.update_action.as_str().normal(),
        };
        let reboot = if component.reboot_required {
            " (reboot)"
        } else {
            ""
        };
        println!(
            "  {} {} -> {} [{}]{}",
            component.name,
            component.current_version,
            component.baseline_version,
            action,
            reboot
        );
    }
    println!();
}
