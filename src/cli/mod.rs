//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod find;
pub mod providers;
pub mod serve;

use clap::{Parser, Subcommand};

/// Drive-thru restaurant locator
#[derive(Parser)]
#[command(name = "drivethru")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find nearby drive-thru locations
    Find(find::FindArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// List registered providers
    Providers(providers::ProvidersArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Find(args) => find::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Providers(args) => providers::run(args),
        Commands::Config(args) => config::run(args),
    }
}
