//! Job command handlers
//!
//! Handles job inspection, execution-log access, and watching a job until
//! it stops.

use anyhow::{Result, bail};
use clap::Subcommand;
use colored::*;
use ome_core::domain::job::{Job, JobStatus};
use ome_jobs::{JobMonitor, MonitorConfig, MonitorError};

use crate::config::Config;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Get job details
    Get {
        /// Job id
        id: i64,
    },
    /// Print the execution log of the job's most recent run
    Details {
        /// Job id
        id: i64,
    },
    /// Run a job now
    Run {
        /// Job id
        id: i64,
    },
    /// Poll a job until it reaches a terminal state, then print its log
    Watch {
        /// Job id
        id: i64,

        /// Give up after this many minutes of polling
        #[arg(long, default_value_t = 15)]
        timeout_minutes: u64,

        /// Treat "completed with errors" as success
        #[arg(long)]
        allow_partial_failure: bool,
    },
}

/// Handle job commands
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        JobCommands::Get { id } => get_job(&client, id).await,
        JobCommands::Details { id } => get_job_details(&client, id).await,
        JobCommands::Run { id } => run_job(&client, id).await,
        JobCommands::Watch {
            id,
            timeout_minutes,
            allow_partial_failure,
        } => watch_job(&client, id, timeout_minutes, allow_partial_failure).await,
    }
}

/// Get and display a single job
async fn get_job(client: &ome_client::OmeClient, id: i64) -> Result<()> {
    let job = client.get_job(id).await?;
    print_job(&job);
    Ok(())
}

/// Print the result lines of the job's most recent run
async fn get_job_details(client: &ome_client::OmeClient, id: i64) -> Result<()> {
    let history = client.get_last_execution_detail(id).await?;
    let details = client.get_execution_details(id, history.id).await?;

    if details.is_empty() {
        println!("{}", "No execution details recorded.".yellow());
        return Ok(());
    }

    for detail in details {
        if detail.key.is_empty() {
            println!("{}", detail.value);
        } else {
            println!("{}: {}", detail.key.bold(), detail.value);
        }
    }

    Ok(())
}

/// Run a job immediately
async fn run_job(client: &ome_client::OmeClient, id: i64) -> Result<()> {
    client.run_job(id).await?;
    println!("{}", format!("Job {} started.", id).green());
    Ok(())
}

/// Watch a job to completion
async fn watch_job(
    client: &ome_client::OmeClient,
    id: i64,
    timeout_minutes: u64,
    allow_partial_failure: bool,
) -> Result<()> {
    let config =
        MonitorConfig::discovery(timeout_minutes).with_partial_failure(allow_partial_failure);
    let monitor = JobMonitor::new(client.clone(), config);

    println!("Watching job {} (timeout {} min)...", id, timeout_minutes);

    let outcome = match monitor.watch(id).await {
        Ok(outcome) => outcome,
        Err(MonitorError::CompletedWithErrors { job_id }) => {
            bail!("job {} completed with errors", job_id);
        }
        Err(MonitorError::TimedOut { job_id, polls }) => {
            bail!(
                "job {} still not finished after {} poll(s); giving up",
                job_id,
                polls
            );
        }
        Err(err) => return Err(err.into()),
    };

    println!("Final status: {}", colored_status(outcome.status));

    for detail in &outcome.execution_log {
        if detail.key.is_empty() {
            println!("{}", detail.value);
        } else {
            println!("{}: {}", detail.key.bold(), detail.value);
        }
    }

    // The monitor exits its loop on any terminal status; whether that is
    // bad news is decided here.
    match outcome.status {
        JobStatus::Failed | JobStatus::Aborted | JobStatus::Stopped | JobStatus::Cancelled => {
            bail!("job {} finished as {}", id, outcome.status)
        }
        _ => Ok(()),
    }
}

fn print_job(job: &Job) {
    println!("{}", format!("Job {}", job.id).bold());
    println!("  Name:   {}", job.name);
    if !job.job_type.is_empty() {
        println!("  Type:   {}", job.job_type);
    }
    if !job.state.is_empty() {
        println!("  State:  {}", job.state);
    }
    println!("  Status: {}", colored_status(job.status));
    if let Some(start) = job.start_time {
        println!("  Start:  {}", start);
    }
    if let Some(end) = job.end_time {
        println!("  End:    {}", end);
    }
}

fn colored_status(status: JobStatus) -> ColoredString {
    match status {
        JobStatus::CompletedWithSuccess => status.label().green(),
        JobStatus::CompletedWithError => status.label().yellow(),
        JobStatus::Failed | JobStatus::Aborted | JobStatus::Stopped | JobStatus::Cancelled => {
            status.label().red()
        }
        _ => status.label().normal(),
    }
}
