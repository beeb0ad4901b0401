//! omectl
//!
//! Command-line interface for Dell OpenManage Enterprise firmware
//! management: catalogs, baselines, compliance reports, and job watching.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "omectl")]
#[command(about = "OpenManage Enterprise firmware management CLI", long_about = None)]
struct Cli {
    /// Appliance URL
    #[arg(long, env = "OME_URL")]
    url: String,

    /// Appliance account name
    #[arg(long, env = "OME_USERNAME")]
    username: String,

    /// Appliance account password
    #[arg(long, env = "OME_PASSWORD", hide_env_values = true)]
    password: String,

    /// Accept self-signed appliance certificates
    #[arg(long, env = "OME_INSECURE", default_value_t = false)]
    insecure: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "omectl=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        url: cli.url,
        username: cli.username,
        password: cli.password,
        insecure: cli.insecure,
    };

    handle_command(cli.command, &config).await
}
