//! CLI command definitions and dispatch.

pub mod once;
pub mod watch;

use clap::{Parser, Subcommand};

/// AuthGate — token lifecycle demo client
#[derive(Debug, Parser)]
#[command(name = "authgate", version, about, long_about = None)]
pub struct Cli {
    /// Server base URL
    #[arg(short, long, default_value = "http://localhost:4000")]
    pub server: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in, fetch /me once, log out
    Once(once::OnceArgs),
    /// Log in and poll /me, demonstrating automatic token refresh
    Watch(watch::WatchArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Once(args) => once::execute(args, &self.server).await,
            Commands::Watch(args) => watch::execute(args, &self.server).await,
        }
    }
}
