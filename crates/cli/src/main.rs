//! Oculog CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run usage-log store migrations
//! oculog migrate
//!
//! # Wipe every usage log for every owner
//! oculog clear-logs --yes
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `clear-logs` - Clear the entire usage-log store

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "oculog")]
#[command(author, version, about = "Oculog CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Wipe every usage log for every owner (administrative)
    ClearLogs {
        /// Confirm the wipe; the command refuses to run without it
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::ClearLogs { yes } => commands::clear::run(yes).await?,
    }
    Ok(())
}
