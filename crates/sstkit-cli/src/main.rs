//! SSTKit CLI - Command-line interface for the SSTKit tracking SDK
//!
//! Provides commands for:
//! - Tracking events against a configured account
//! - Exercising the diagnostic error channel
//! - Inspecting the per-install identity
//! - Managing the persistent stores

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod advert;
mod commands;
mod output;
mod profile;

use commands::{
    completions::CompletionsCommand, send_error::SendErrorCommand, storage::StorageCommand,
    track::TrackCommand, uuid::UuidCommand,
};
use output::OutputFormat;
use profile::Profile;

#[derive(Debug, Parser)]
#[command(name = "sstkit", version, about = "Server-side tagging SDK tool")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate profile file
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Track an event through the assembly pipeline
    Track(TrackCommand),
    /// Post a report to the diagnostic channel
    SendError(SendErrorCommand),
    /// Show or clear the per-install identity
    #[command(subcommand)]
    Uuid(UuidCommand),
    /// Manage the persistent stores
    #[command(subcommand)]
    Storage(StorageCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    // Completions must emit only the script; everything else runs against a
    // configured SDK.
    if !matches!(cli.command, Commands::Completions(_)) {
        let path = cli
            .profile
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(Profile::default_path);
        sstkit::configure(Profile::load_or_default(&path).to_config());
    }

    match cli.command {
        Commands::Track(cmd) => cmd.execute(format).await,
        Commands::SendError(cmd) => cmd.execute(format).await,
        Commands::Uuid(cmd) => cmd.execute(format).await,
        Commands::Storage(cmd) => cmd.execute(format).await,
        Commands::Completions(cmd) => cmd.execute(format).await,
    }
}
