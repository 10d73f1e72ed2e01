//! Memoir CLI
//!
//! Reads and writes journal keys through the same two-tier storage the app
//! uses: a local cache under `$MEMOIR_HOME/cache` backed by a remote store.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::Remote;
use config::SettingsManager;
use memoir_core::KvHandle;
use std::sync::Arc;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "memoir")]
#[command(author, version, about = "Memoir - journal storage from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Memoir server URL (overrides settings.json)
    #[arg(long, global = true, env = "MEMOIR_SERVER")]
    server: Option<String>,

    /// Never contact a remote store
    #[arg(long, global = true)]
    local_only: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value stored under a key
    Get {
        key: String,

        /// JSON returned when nothing usable is stored
        #[arg(long)]
        fallback: Option<String>,
    },

    /// Store a JSON value under a key
    Set {
        key: String,
        /// JSON value
        value: String,
    },

    /// Remove a key from both tiers
    Rm { key: String },

    /// List the keys used by the journal
    Keys,

    /// Show whether changes sync to the cloud
    Status {
        /// Keep probing until interrupted
        #[arg(short, long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "memoir=debug,memoir_core=debug"
        } else {
            "memoir=info,memoir_core=warn"
        })
    });
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let result = run(cli).await;

    if let Err(ref e) = result {
        error!("Command failed: {}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    result
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Keys = cli.command {
        return commands::storage::keys();
    }

    let manager = SettingsManager::from_env()?;
    let settings = manager.load()?;
    debug!("Settings loaded from {}", manager.settings_path().display());

    let server = cli.server.or_else(|| settings.server_url.clone());
    let kv = KvHandle::from_env();
    let remote = Remote::select(server.as_deref(), &kv, cli.local_only);
    let gateway = remote.gateway(&manager.cache_dir());

    match cli.command {
        Commands::Get { key, fallback } => {
            commands::storage::get(&gateway, &key, fallback.as_deref()).await
        }
        Commands::Set { key, value } => commands::storage::set(&gateway, &key, &value).await,
        Commands::Rm { key } => commands::storage::rm(&gateway, &key).await,
        Commands::Status { watch } => {
            commands::status::execute(
                Arc::new(gateway),
                &remote.to_string(),
                settings.probe_interval(),
                watch,
            )
            .await
        }
        Commands::Keys => commands::storage::keys(),
    }
}
