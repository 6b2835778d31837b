//! Command-line interface for lingo.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lingo - Turkish word-guessing game server
#[derive(Parser, Debug)]
#[command(name = "lingo")]
#[command(about = "Timed Turkish word-guessing game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides config and LINGO_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config, LINGO_PORT and PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Dictionary file (overrides config and LINGO_DICTIONARY)
        #[arg(short, long)]
        dictionary: Option<PathBuf>,
    },

    /// Load a dictionary file and print its word counts per length
    Dictionary {
        /// Dictionary file, JSON or newline-separated
        path: PathBuf,
    },
}
