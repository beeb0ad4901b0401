//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod baseline;
mod catalog;
mod compliance;
mod job;

pub use baseline::BaselineCommands;
pub use catalog::CatalogCommands;
pub use compliance::ComplianceCommands;
pub use job::JobCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Firmware catalog management
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Firmware baseline management
    Baseline {
        #[command(subcommand)]
        command: BaselineCommands,
    },
    /// Device compliance reports
    Compliance {
        #[command(subcommand)]
        command: ComplianceCommands,
    },
    /// Job inspection and watching
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Catalog { command } => catalog::handle_catalog_command(command, config).await,
        Commands::Baseline { command } => baseline::handle_baseline_command(command, config).await,
        Commands::Compliance { command } => {
            compliance::handle_compliance_command(command, config).await
        }
        Commands::Job { command } => job::handle_job_command(command, config).await,
    }
}
