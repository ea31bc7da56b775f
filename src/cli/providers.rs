//! Providers command handler
//!
//! Lists the providers the binary can query.

use crate::error::Result;
use crate::provider::ProviderRegistry;
use clap::Args;

/// Providers command arguments
#[derive(Args)]
pub struct ProvidersArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the providers command
pub fn run(args: ProvidersArgs) -> Result<()> {
    let registry = ProviderRegistry::with_defaults();
    let providers = registry.available();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&providers)?);
    } else {
        println!("Registered providers:");
        for info in providers {
            println!("  {:12} - {}", info.name, info.description);
        }
    }

    Ok(())
}
