//! drivethru-finder: Drive-Thru Restaurant Locator
//!
//! A library and CLI tool for finding open drive-thru restaurants near a
//! coordinate by aggregating upstream restaurant-chain locator APIs.
//!
//! ## Features
//!
//! - Pluggable providers, one per restaurant chain
//! - Canonical location records normalized from heterogeneous API shapes
//! - Great-circle distance ranking and radius filtering
//! - Timezone-correct open/closed status from local opening-hours strings
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use drivethru_finder::aggregator::{Aggregator, SearchQuery};
//! use drivethru_finder::geo::Coordinates;
//! use drivethru_finder::provider::ProviderRegistry;
//!
//! # async fn example() -> drivethru_finder::Result<()> {
//! let registry = ProviderRegistry::with_defaults();
//! let query = SearchQuery::build(
//!     Coordinates::new(40.8768, -73.3246),
//!     None, // radius: defaults to 5 miles
//!     None, // max results: defaults to 30
//!     None, // types: defaults to all registered providers
//!     &registry,
//! )?;
//!
//! let aggregator = Aggregator::new(registry);
//! let result = aggregator.aggregate(&query).await;
//! println!("Found {} locations", result.locations.len());
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod geo;
pub mod hours;
pub mod provider;
pub mod server;

// Re-export commonly used types
pub use aggregator::{AggregateResult, Aggregator, SearchQuery};
pub use config::Config;
pub use error::{Error, Result};
pub use geo::Coordinates;
pub use provider::{Location, ProviderKind, ProviderRegistry};
