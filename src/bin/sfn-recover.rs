//! # sfn-recover CLI
//!
//! Command-line interface for recovering failed and timed-out Step Functions
//! executions by restarting or redriving them.

mod cli;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sfn_recover::logging::init_structured_logging;
use sfn_recover::types::parse_timestamp;
use sfn_recover::{FailedStatus, RecoverConfig};
use std::path::PathBuf;
use tracing::info;

use cli::{handle_config_command, handle_list_command, handle_recover_command, RecoveryAction};

#[derive(Parser, Debug)]
#[command(name = "sfn-recover")]
#[command(about = "Restart or redrive failed and timed-out Step Functions executions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file path (default: ./sfn-recover.toml or ~/.sfn-recover/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// State machine ARN whose executions are recovered
    #[arg(short = 'a', long, global = true)]
    state_machine_arn: Option<String>,

    /// Only executions started at or after this time (Unix seconds or RFC 3339, 0 = unbounded)
    #[arg(long, global = true)]
    from: Option<String>,

    /// Only executions started at or before this time (Unix seconds or RFC 3339, 0 = unbounded)
    #[arg(long, global = true)]
    to: Option<String>,

    /// AWS region override
    #[arg(long, global = true)]
    region: Option<String>,

    /// AWS shared config profile
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Alternate Step Functions endpoint
    #[arg(long, global = true)]
    endpoint_url: Option<String>,

    /// Subcommands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start a new execution for each match, with the original input
    Restart {
        /// Which executions to restart: failed or timed-out
        #[arg(short, long)]
        status: FailedStatus,
    },

    /// Redrive each match in place from its point of failure
    Redrive {
        /// Which executions to redrive: failed or timed-out
        #[arg(short, long)]
        status: FailedStatus,
    },

    /// List the executions a recovery would touch, without changing anything
    List {
        /// Which executions to list: failed or timed-out
        #[arg(short, long)]
        status: FailedStatus,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Destination (default: ~/.sfn-recover/config.toml)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Apply command-line overrides on top of file and environment settings.
    /// Validation is left to the caller so it sees the final layered values.
    fn apply_overrides(&self, config: &mut RecoverConfig) -> anyhow::Result<()> {
        if let Some(arn) = &self.state_machine_arn {
            config.recovery.state_machine_arn = Some(arn.clone());
        }
        if let Some(from) = &self.from {
            config.recovery.from_timestamp = parse_timestamp(from)?;
        }
        if let Some(to) = &self.to {
            config.recovery.to_timestamp = parse_timestamp(to)?;
        }
        if let Some(region) = &self.region {
            config.aws.region = Some(region.clone());
        }
        if let Some(profile) = &self.profile {
            config.aws.profile = Some(profile.clone());
        }
        if let Some(endpoint) = &self.endpoint_url {
            config.aws.endpoint_url = Some(endpoint.clone());
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_structured_logging(cli.verbose);

    let mut config = RecoverConfig::load_with_path(cli.config.as_deref())
        .context("Failed to load configuration")?;
    cli.apply_overrides(&mut config)?;

    // `config show` / `config init` must still work on an invalid config
    if !matches!(cli.command, Commands::Config(_)) {
        config.validate().context("Invalid configuration")?;
    }

    info!(
        state_machine_arn = ?config.recovery.state_machine_arn,
        window = %config.recovery.time_window(),
        "sfn-recover starting"
    );

    match cli.command {
        Commands::Restart { status } => {
            handle_recover_command(RecoveryAction::Restart, status, &config)
                .await
                .context("Recovery stopped")?
        }
        Commands::Redrive { status } => {
            handle_recover_command(RecoveryAction::Redrive, status, &config)
                .await
                .context("Recovery stopped")?
        }
        Commands::List { status, format } => handle_list_command(status, &format, &config).await?,
        Commands::Config(config_cmd) => handle_config_command(config_cmd, &config)?,
    }

    Ok(())
}
