//! Command-line entry point for group synchronization.
//!
//! Run with: `umsync <groups.json> [--config <path>]`
//!
//! Without `--config` the configuration is read from `UMSYNC_*` environment
//! variables, falling back to a probed `umsync.{json,toml}` file. Usage
//! errors go to stderr; everything else is logged through `tracing`.

#![allow(clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use umsync_core::ExternalGroupManagement;
use umsync_domain::GroupDefinition;
use umsync_infra::observability::{init_tracing, LogFormat};
use umsync_infra::{config, ImsUserManagement};

const ENVIRONMENT_HELP: &str = "\
Environment:
  UMSYNC_ORGANIZATION_ID, UMSYNC_CLIENT_ID, UMSYNC_CLIENT_SECRET, ...
  UMSYNC_LOG_FORMAT=json  Emit JSON log lines
  RUST_LOG                Log filter (default: info)";

/// Synchronize group definitions into Adobe IMS.
#[derive(Debug, Parser)]
#[command(name = "umsync", version, after_help = ENVIRONMENT_HELP)]
struct Args {
    /// JSON file holding the group definitions to synchronize
    groups: PathBuf,

    /// JSON or TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = LogFormat::from_env().and_then(|format| init_tracing("info", format)) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Synchronization failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = match args.config {
        Some(path) => config::load_from_file(Some(path)),
        None => config::load(),
    }
    .context("Failed to load configuration")?;

    let groups = read_groups(&args.groups)?;
    let manager = ImsUserManagement::new(config).context("Invalid configuration")?;
    let label = manager.label().to_string();

    let result = manager.update_groups(&groups).await;
    manager.shutdown();
    let summary = result.with_context(|| format!("{label} group update failed"))?;

    info!(
        label = %label,
        batches = summary.batches_sent,
        commands = summary.commands_sent,
        completed = summary.completed,
        completed_in_test_mode = summary.completed_in_test_mode,
        warnings = summary.warnings.len(),
        "Synchronization finished"
    );
    Ok(())
}

fn read_groups(path: &Path) -> anyhow::Result<Vec<GroupDefinition>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read groups file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid groups file {}", path.display()))
}
