//! Catalog command handlers
//!
//! Handles firmware catalog listing, creation, refresh, and deletion.

use anyhow::{Result, anyhow, bail};
use clap::Subcommand;
use colored::*;
use ome_core::domain::catalog::{Catalog, RepositoryType};
use ome_core::dto::catalog::CatalogSource;
use ome_jobs::{JobMonitor, MonitorConfig};

use crate::config::Config;

/// Catalog subcommands
#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all catalogs
    List,
    /// Get catalog details
    Get {
        /// Catalog (repository) name
        name: String,
    },
    /// Create a catalog
    Create {
        /// Catalog (repository) name
        name: String,

        /// Repository type: NFS, CIFS, HTTP, HTTPS, or DELL_ONLINE
        #[arg(long, default_value = "DELL_ONLINE")]
        repo_type: String,

        /// Host or share the repository lives on
        #[arg(long, default_value = "")]
        source: String,

        /// Path to the catalog file within the repository
        #[arg(long, default_value = "")]
        source_path: String,

        /// Catalog filename
        #[arg(long, default_value = "")]
        filename: String,

        /// Repository description
        #[arg(long, default_value = "")]
        description: String,

        /// Repository account name (CIFS)
        #[arg(long)]
        username: Option<String>,

        /// Repository account password (CIFS)
        #[arg(long)]
        password: Option<String>,

        /// Repository domain (CIFS)
        #[arg(long)]
        domain: Option<String>,

        /// Validate the repository certificate (HTTPS)
        #[arg(long)]
        check_certificate: bool,

        /// Wait for the catalog download job to finish
        #[arg(long)]
        wait: bool,

        /// Give up waiting after this many minutes
        #[arg(long, default_value_t = 15)]
        timeout_minutes: u64,
    },
    /// Refresh a catalog from its repository
    Refresh {
        /// Catalog (repository) name
        name: String,
    },
    /// Delete a catalog
    Delete {
        /// Catalog (repository) name
        name: String,
    },
}

/// Handle catalog commands
pub async fn handle_catalog_command(command: CatalogCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        CatalogCommands::List => list_catalogs(&client).await,
        CatalogCommands::Get { name } => get_catalog(&client, &name).await,
        CatalogCommands::Create {
            name,
            repo_type,
            source,
            source_path,
            filename,
            description,
            username,
            password,
            domain,
            check_certificate,
            wait,
            timeout_minutes,
        } => {
            let repository_type = RepositoryType::parse(&repo_type)
                .ok_or_else(|| anyhow!("unknown repository type '{}'", repo_type))?;
            let source = CatalogSource {
                name,
                description,
                repository_type: Some(repository_type),
                source,
                source_path,
                filename,
                username,
                password,
                domain_name: domain,
                check_certificate,
            };
            create_catalog(&client, source, wait, timeout_minutes).await
        }
        CatalogCommands::Refresh { name } => refresh_catalog(&client, &name).await,
        CatalogCommands::Delete { name } => delete_catalog(&client, &name).await,
    }
}

/// List all catalogs
async fn list_catalogs(client: &ome_client::OmeClient) -> Result<()> {
    let catalogs = client.list_catalogs().await?;

    if catalogs.is_empty() {
        println!("{}", "No catalogs found.".yellow());
    } else {
        println!("{}", format!("Found {} catalog(s):", catalogs.len()).bold());
        println!();
        for catalog in catalogs {
            print_catalog_summary(&catalog);
        }
    }

    Ok(())
}

/// Get and display a single catalog
async fn get_catalog(client: &ome_client::OmeClient, name: &str) -> Result<()> {
    let catalog = client.get_catalog_by_name(name).await?;

    println!("{}", format!("Catalog {} ({})", catalog.name, catalog.id).bold());
    println!("  Type:      {}", catalog.repository.repository_type);
    println!("  Source:    {}", catalog.repository.source);
    if !catalog.source_path.is_empty() {
        println!("  Path:      {}/{}", catalog.source_path, catalog.filename);
    }
    if let Some(status) = &catalog.status {
        println!("  Status:    {}", status);
    }
    if let Some(updated) = catalog.last_update {
        println!("  Updated:   {}", updated);
    }
    if !catalog.associated_baseline_ids.is_empty() {
        let ids: Vec<String> = catalog
            .associated_baseline_ids
            .iter()
            .map(|id| id.to_string())
            .collect();
        println!("  Baselines: {}", ids.join(", "));
    }

    Ok(())
}

/// Create a catalog, optionally waiting for its download job
async fn create_catalog(
    client: &ome_client::OmeClient,
    source: CatalogSource,
    wait: bool,
    timeout_minutes: u64,
) -> Result<()> {
    let catalog = client.create_catalog(source).await?;
    println!(
        "{}",
        format!("Created catalog {} ({}).", catalog.name, catalog.id).green()
    );

    if !wait {
        return Ok(());
    }

    let Some(task_id) = catalog.task_id else {
        bail!("catalog {} has no download task to wait for", catalog.name);
    };

    println!("Waiting for catalog download job {}...", task_id);
    let monitor = JobMonitor::new(client.clone(), MonitorConfig::discovery(timeout_minutes));
    let outcome = monitor.watch(task_id).await?;
    println!("Download job finished: {}", outcome.status);

    Ok(())
}

/// Refresh a catalog from its repository
async fn refresh_catalog(client: &ome_client::OmeClient, name: &str) -> Result<()> {
    let catalog = client.get_catalog_by_name(name).await?;
    client.refresh_catalog(catalog.id).await?;
    println!("{}", format!("Refresh of '{}' scheduled.", name).green());
    Ok(())
}

/// Delete a catalog
async fn delete_catalog(client: &ome_client::OmeClient, name: &str) -> Result<()> {
    let catalog = client.get_catalog_by_name(name).await?;
    client.delete_catalog(catalog.id).await?;
    println!("{}", format!("Deleted catalog '{}'.", name).green());
    Ok(())
}

fn print_catalog_summary(catalog: &Catalog) {
    println!(
        "{} {} [{}] {}",
        format!("{:>6}", catalog.id).bold(),
        catalog.name,
        catalog.repository.repository_type,
        catalog.status.as_deref().unwrap_or("-")
    );
}
