// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lumen - read and write game records in a hosted realtime database.
//!
//! This is the binary entry point. It loads configuration, installs the
//! tracing subscriber, builds the database client and the shared [`Store`],
//! and dispatches to a subcommand.

mod check;
mod data;
mod demo;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use lumen_config::LumenConfig;
use lumen_core::LumenError;
use lumen_firebase::FirebaseClient;
use lumen_store::Store;

/// Lumen - read and write game records in a hosted realtime database.
#[derive(Parser, Debug)]
#[command(name = "lumen", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the XDG hierarchy.
    #[arg(long, short, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the database is configured and reachable.
    Check,
    /// Write a JSON value at a path.
    Write {
        /// Slash-delimited path, e.g. `players/testUser`.
        path: String,
        /// JSON value to store.
        json: String,
    },
    /// Fetch the JSON value stored at a path.
    Fetch {
        /// Slash-delimited path, e.g. `players/testUser`.
        path: String,
    },
    /// Write the sample player record and read it back.
    Demo,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => lumen_config::load_and_validate_path(path),
        None => lumen_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            lumen_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);
    tracing::debug!(app = %config.app.name, "configuration loaded");

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("lumen: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &LumenConfig) -> Result<(), LumenError> {
    let client = Arc::new(FirebaseClient::from_config(config)?);

    match command {
        Commands::Check => check::run_check(client.as_ref()).await,
        Commands::Write { path, json } => {
            data::run_write(&*connect(client).await?, &path, &json).await
        }
        Commands::Fetch { path } => data::run_fetch(&*connect(client).await?, &path).await,
        Commands::Demo => demo::run_demo(&*connect(client).await?).await,
    }
}

/// Builds the shared store and waits for its initialization.
async fn connect(client: Arc<FirebaseClient>) -> Result<Arc<Store>, LumenError> {
    let store = Arc::new(Store::new(client));
    store.initialize().await?;
    Ok(store)
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lumen={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
