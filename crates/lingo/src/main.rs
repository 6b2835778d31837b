//! Lingo - Unified CLI
//!
//! Serves the game over HTTP and inspects dictionary files.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use lingo_core::{Dictionary, WordLength};
use lingo_server::ServerConfig;
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,lingo=debug")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            dictionary,
        } => run_server(config, host, port, dictionary).await,
        Command::Dictionary { path } => inspect_dictionary(path),
    }
}

/// Run the HTTP game server
#[instrument]
async fn run_server(
    config: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    dictionary: Option<PathBuf>,
) -> Result<()> {
    let mut config = ServerConfig::load(config.as_deref())?;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(dictionary) = dictionary {
        config = config.with_dictionary(dictionary);
    }

    info!(
        host = %config.host(),
        port = config.port(),
        dictionary = %config.dictionary().display(),
        "Starting Lingo server"
    );
    lingo_server::run(config).await?;
    Ok(())
}

/// Print bucket sizes of a dictionary file
#[instrument(skip_all, fields(path = %path.display()))]
fn inspect_dictionary(path: PathBuf) -> Result<()> {
    let dictionary = Dictionary::load(&path)?;

    println!("{}", path.display());
    for length in [
        WordLength::Four,
        WordLength::Five,
        WordLength::Six,
        WordLength::Seven,
    ] {
        println!("  {} letters: {}", length, dictionary.count(length));
    }
    println!("  total: {}", dictionary.total());
    Ok(())
}
