//! Baseline command handlers
//!
//! Handles firmware baseline listing, creation, update, and deletion.
//! Create and update take exactly one of `--device-names`, `--group-names`,
//! or `--service-tags` to pick the targets.

use anyhow::{Result, bail};
use clap::Subcommand;
use colored::*;
use ome_client::OmeClient;
use ome_core::domain::baseline::{Baseline, BaselineSettings};
use ome_core::domain::target::TargetSelector;
use ome_jobs::{JobMonitor, MonitorConfig};

use crate::config::Config;

/// Baseline subcommands
#[derive(Subcommand)]
pub enum BaselineCommands {
    /// List all baselines
    List,
    /// Get baseline details
    Get {
        /// Baseline name
        name: String,
    },
    /// Create a baseline
    Create {
        /// Baseline name
        name: String,

        /// Catalog to compare against
        #[arg(long)]
        catalog: String,

        /// Baseline description
        #[arg(long, default_value = "")]
        description: String,

        /// Target device names (comma separated)
        #[arg(long, value_delimiter = ',')]
        device_names: Vec<String>,

        /// Target group names (comma separated)
        #[arg(long, value_delimiter = ',')]
        group_names: Vec<String>,

        /// Target device service tags (comma separated)
        #[arg(long, value_delimiter = ',')]
        service_tags: Vec<String>,

        /// Allow firmware downgrades
        #[arg(long)]
        downgrade: bool,

        /// Only report updates that need no reboot
        #[arg(long)]
        no_reboot_only: bool,

        /// Wait for the compliance job to finish
        #[arg(long)]
        wait: bool,

        /// Give up waiting after this many minutes
        #[arg(long, default_value_t = 15)]
        timeout_minutes: u64,
    },
    /// Update a baseline
    Update {
        /// Baseline name
        name: String,

        /// New baseline name
        #[arg(long)]
        new_name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// Switch to another catalog
        #[arg(long)]
        catalog: Option<String>,

        /// Replace targets with these device names (comma separated)
        #[arg(long, value_delimiter = ',')]
        device_names: Vec<String>,

        /// Replace targets with these group names (comma separated)
        #[arg(long, value_delimiter = ',')]
        group_names: Vec<String>,

        /// Replace targets with these service tags (comma separated)
        #[arg(long, value_delimiter = ',')]
        service_tags: Vec<String>,

        /// Allow firmware downgrades
        #[arg(long)]
        downgrade: bool,

        /// Only report updates that need no reboot
        #[arg(long)]
        no_reboot_only: bool,
    },
    /// Delete a baseline
    Delete {
        /// Baseline name
        name: String,
    },
}

/// Handle baseline commands
pub async fn handle_baseline_command(command: BaselineCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        BaselineCommands::List => list_baselines(&client).await,
        BaselineCommands::Get { name } => get_baseline(&client, &name).await,
        BaselineCommands::Create {
            name,
            catalog,
            description,
            device_names,
            group_names,
            service_tags,
            downgrade,
            no_reboot_only,
            wait,
            timeout_minutes,
        } => {
            let selector = TargetSelector::new(device_names, group_names, service_tags)?;
            create_baseline(
                &client,
                name,
                catalog,
                description,
                selector,
                downgrade,
                no_reboot_only,
                wait,
                timeout_minutes,
            )
            .await
        }
        BaselineCommands::Update {
            name,
            new_name,
            description,
            catalog,
            device_names,
            group_names,
            service_tags,
            downgrade,
            no_reboot_only,
        } => {
            update_baseline(
                &client,
                name,
                new_name,
                description,
                catalog,
                device_names,
                group_names,
                service_tags,
                downgrade,
                no_reboot_only,
            )
            .await
        }
        BaselineCommands::Delete { name } => delete_baseline(&client, &name).await,
    }
}

/// List all baselines
async fn list_baselines(client: &OmeClient) -> Result<()> {
    let baselines = client.list_baselines().await?;

    if baselines.is_empty() {
        println!("{}", "No baselines found.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} baseline(s):", baselines.len()).bold()
        );
        println!();
        for baseline in baselines {
            print_baseline_summary(&baseline);
        }
    }

    Ok(())
}

/// Get and display a single baseline
async fn get_baseline(client: &OmeClient, name: &str) -> Result<()> {
    let baseline = client.get_baseline_by_name(name).await?;

    println!(
        "{}",
        format!("Baseline {} ({})", baseline.name, baseline.id).bold()
    );
    if let Some(description) = &baseline.description {
        if !description.is_empty() {
            println!("  Description: {}", description);
        }
    }
    println!("  Catalog:     {}", baseline.catalog_id);
    println!("  Targets:     {}", baseline.targets.len());
    println!("  Downgrade:   {}", baseline.downgrade_enabled);
    if let Some(task_id) = baseline.task_id {
        println!(
            "  Task:        {} ({})",
            task_id,
            baseline.task_status.as_deref().unwrap_or("-")
        );
    }
    if let Some(summary) = &baseline.compliance_summary {
        println!("  Compliance:  {}", summary.compliance_status);
        println!(
            "    critical {} / warning {} / ok {} / downgrade {} / unknown {}",
            summary.number_of_critical,
            summary.number_of_warning,
            summary.number_of_normal,
            summary.number_of_downgrade,
            summary.number_of_unknown
        );
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn create_baseline(
    client: &OmeClient,
    name: String,
    catalog: String,
    description: String,
    selector: TargetSelector,
    downgrade: bool,
    no_reboot_only: bool,
    wait: bool,
    timeout_minutes: u64,
) -> Result<()> {
    let catalog = client.get_catalog_by_name(&catalog).await?;
    let targets = client.resolve_targets(&selector).await?;

    let settings = BaselineSettings {
        name,
        description,
        catalog_id: catalog.id,
        repository_id: catalog.repository.id,
        targets,
        is_64_bit: true,
        filter_no_reboot_required: no_reboot_only,
        downgrade_enabled: downgrade,
    };

    let baseline = client.create_baseline(&settings).await?;
    println!(
        "{}",
        format!("Created baseline {} ({}).", baseline.name, baseline.id).green()
    );

    if !wait {
        return Ok(());
    }

    let Some(task_id) = baseline.task_id else {
        bail!("baseline {} has no compliance task to wait for", baseline.name);
    };

    println!("Waiting for compliance job {}...", task_id);
    let monitor = JobMonitor::new(client.clone(), MonitorConfig::discovery(timeout_minutes));
    let outcome = monitor.watch(task_id).await?;
    println!("Compliance job finished: {}", outcome.status);

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn update_baseline(
    client: &OmeClient,
    name: String,
    new_name: Option<String>,
    description: Option<String>,
    catalog: Option<String>,
    device_names: Vec<String>,
    group_names: Vec<String>,
    service_tags: Vec<String>,
    downgrade: bool,
    no_reboot_only: bool,
) -> Result<()> {
    let current = client.get_baseline_by_name(&name).await?;

    let (catalog_id, repository_id) = match catalog {
        Some(catalog_name) => {
            let catalog = client.get_catalog_by_name(&catalog_name).await?;
            (catalog.id, catalog.repository.id)
        }
        None => (0, 0),
    };

    // Untouched selector lists leave the targets alone; the diff carries
    // the current targets forward when the desired list is empty.
    let targets = if device_names.is_empty() && group_names.is_empty() && service_tags.is_empty() {
        Vec::new()
    } else {
        let selector = TargetSelector::new(device_names, group_names, service_tags)?;
        client.resolve_targets(&selector).await?
    };

    let desired = BaselineSettings {
        name: new_name.unwrap_or_default(),
        description: description.unwrap_or_default(),
        catalog_id,
        repository_id,
        targets,
        is_64_bit: current.is_64_bit,
        filter_no_reboot_required: no_reboot_only,
        downgrade_enabled: downgrade,
    };

    let baseline = client.update_baseline(&desired, &current).await?;
    println!(
        "{}",
        format!("Updated baseline {} ({}).", baseline.name, baseline.id).green()
    );

    Ok(())
}

/// Delete a baseline
async fn delete_baseline(client: &OmeClient, name: &str) -> Result<()> {
    let baseline = client.get_baseline_by_name(name).await?;
    client.delete_baseline(baseline.id).await?;
    println!("{}", format!("Deleted baseline '{}'.", name).green());
    Ok(())
}

fn print_baseline_summary(baseline: &Baseline) {
    let compliance = baseline
        .compliance_summary
        .as_ref()
        .map(|summary| summary.compliance_status.as_str())
        .unwrap_or("-");
    println!(
        "{} {} catalog={} targets={} compliance={}",
        format!("{:>6}", baseline.id).bold(),
        baseline.name,
        baseline.catalog_id,
        baseline.targets.len(),
        compliance
    );
}
