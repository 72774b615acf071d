mod app;
mod config;
mod dashboard;
mod docker;
mod events;
mod filter;
mod logging;
mod metrics;
mod report;
mod snapshot;
mod types;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{get_data_dir, load_config, load_config_from, AppConfig};
use crate::dashboard::Dashboard;
use crate::docker::{ContainerRuntime, DockerClient};

#[derive(Parser)]
#[command(name = "dockdash")]
#[command(author, version, about = "Live terminal dashboard for Docker containers", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive dashboard (default)
    Interactive {
        /// Show fewer columns
        #[arg(long)]
        compact: bool,
        /// Seconds between refreshes
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Print the container table once
    List {
        /// Include stopped containers
        #[arg(short, long)]
        all: bool,
    },

    /// Continuously print container usage
    Stats {
        /// Seconds between updates
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Print the logs of a container
    Logs {
        /// Container name or ID
        container: String,
        /// Number of lines from the end
        #[arg(short, long)]
        tail: Option<usize>,
    },
}

fn interval_or(config: &AppConfig, flag: Option<u64>) -> Duration {
    Duration::from_secs(flag.unwrap_or(config.refresh_interval_secs).max(1))
}

fn connect() -> Result<Arc<dyn ContainerRuntime>> {
    let client = DockerClient::new().context("Failed to connect to Docker")?;
    Ok(Arc::new(client))
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    let data_dir = get_data_dir()?;
    logging::init_tracing(&data_dir, &config.log_level, cli.verbose)?;

    match cli.command.unwrap_or(Commands::Interactive {
        compact: false,
        interval: None,
    }) {
        Commands::Interactive { compact, interval } => {
            if let Some(secs) = interval {
                config.refresh_interval_secs = secs.max(1);
            }
            let runtime = connect()?;
            Dashboard::new(runtime, compact || config.compact, &config)
                .run()
                .await?;
        }
        Commands::List { all } => {
            let runtime = connect()?;
            runtime.ping().await?;
            report::list(runtime.as_ref(), all).await?;
        }
        Commands::Stats { interval } => {
            let runtime = connect()?;
            runtime.ping().await?;
            report::stats(runtime.as_ref(), interval_or(&config, interval)).await?;
        }
        Commands::Logs { container, tail } => {
            let runtime = connect()?;
            runtime.ping().await?;
            let tail = tail.unwrap_or(config.log_tail_lines);
            report::logs(runtime.as_ref(), &container, tail).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "exiting with error");
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
