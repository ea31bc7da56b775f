//! Find command handler
//!
//! One-shot search from the terminal.

use crate::aggregator::{Aggregator, SearchQuery};
use crate::config::Config;
use crate::error::Result;
use crate::format::{available_formats, get_formatter};
use crate::geo::Coordinates;
use crate::provider::{ProviderKind, ProviderRegistry};
use clap::Args;
use std::str::FromStr;

/// Find command arguments
#[derive(Args)]
pub struct FindArgs {
    /// Latitude of the search center
    #[arg(long)]
    pub lat: Option<f64>,

    /// Longitude of the search center
    #[arg(long)]
    pub lng: Option<f64>,

    /// Search radius in miles
    #[arg(long, short = 'r')]
    pub radius: Option<f64>,

    /// Per-provider result cap
    #[arg(long, short = 'n')]
    pub max_results: Option<usize>,

    /// Provider types to query (defaults to all registered)
    #[arg(long, short = 't', value_delimiter = ',')]
    pub types: Vec<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the find command
pub async fn run(args: FindArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let (Some(lat), Some(lng)) = (args.lat, args.lng) else {
        eprintln!("Error: No location specified. Use --lat and --lng");
        std::process::exit(1);
    };

    let config = Config::load()?;
    let registry = ProviderRegistry::with_defaults();

    let types = if args.types.is_empty() {
        None
    } else {
        let parsed: Vec<ProviderKind> = args
            .types
            .iter()
            .map(|t| ProviderKind::from_str(t).map_err(crate::error::Error::UnknownProvider))
            .collect::<Result<_>>()?;
        Some(parsed)
    };

    let query = SearchQuery::build(
        Coordinates::new(lat, lng),
        args.radius.or(Some(config.defaults.radius_miles)),
        args.max_results.or(Some(config.defaults.max_results)),
        types,
        &registry,
    )?;

    let aggregator = Aggregator::new(registry);
    let result = aggregator.aggregate(&query).await;

    let format = args.format.unwrap_or(config.defaults.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| crate::error::Error::Config(format!("Unknown format: {}", format)))?;

    println!("{}", formatter.format(&result)?);

    // Degraded results still print; signal them in the exit code
    if result.locations.is_empty() && !result.errors.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
