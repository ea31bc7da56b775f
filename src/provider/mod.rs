//! Location providers
//!
//! Each upstream restaurant chain gets one provider implementing the same
//! query capability: build a single upstream request, parse that chain's
//! proprietary response shape, and emit canonical [`Location`] records.
//!
//! Adding a new provider requires:
//! 1. Create `src/provider/{chain}.rs` with the chain's client and parser
//! 2. Add a variant to [`ProviderKind`] and [`Provider`]
//! 3. Register it in [`ProviderRegistry::with_defaults`]

pub mod mcdonalds;

use crate::error::Result;
use crate::geo::Coordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a registered provider
///
/// Serialized names are the stable string keys shared between the request's
/// `types` whitelist and the provider lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Mcdonalds,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mcdonalds => write!(f, "mcdonalds"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mcdonalds" | "mcdonald's" => Ok(Self::Mcdonalds),
            _ => Err(format!("Unknown provider type: {}", s)),
        }
    }
}

/// Canonical, provider-agnostic location record
///
/// `open_time`/`close_time` are either both present or both absent; absent
/// means the location is open 24 hours. They serialize as null rather than
/// being omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "type")]
    pub kind: ProviderKind,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub distance_miles: f64,
    pub is_open: bool,
    pub open_time: Option<DateTime<Utc>>,
    pub close_time: Option<DateTime<Utc>>,
}

/// The closed set of provider implementations
///
/// One variant per upstream source, all answering the same `get_locations`
/// contract. Dispatch is a match rather than trait objects so each variant
/// keeps its own response-shape mapping.
#[derive(Debug)]
pub enum Provider {
    Mcdonalds(mcdonalds::McDonalds),
}

impl Provider {
    /// The identifier this provider is registered under
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Mcdonalds(_) => ProviderKind::Mcdonalds,
        }
    }

    /// Human-readable description of the upstream source
    pub fn description(&self) -> &'static str {
        match self {
            Self::Mcdonalds(_) => "McDonald's restaurant locator",
        }
    }

    /// Query the upstream source for drive-thru locations near a point
    ///
    /// Issues exactly one upstream call. Results are sorted ascending by
    /// distance and truncated to `max_results`. Transport or parse failures
    /// surface as a single structured error, never as partial results.
    pub async fn get_locations(
        &self,
        query: Coordinates,
        radius_miles: f64,
        max_results: usize,
    ) -> Result<Vec<Location>> {
        match self {
            Self::Mcdonalds(p) => p.get_locations(query, radius_miles, max_results).await,
        }
    }
}

/// Information about a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (used in request `types` and the registry)
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// Lookup table of registered providers
///
/// Built once at startup and handed to the aggregator; read-only afterwards.
/// Iteration order is registration order, which keeps default "all
/// providers" queries deterministic.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: Vec<Provider>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every supported provider registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Provider::Mcdonalds(mcdonalds::McDonalds::new()));
        registry
    }

    /// Register a provider
    pub fn register(&mut self, provider: Provider) {
        self.providers.push(provider);
    }

    /// Look up a provider by kind
    pub fn get(&self, kind: ProviderKind) -> Option<&Provider> {
        self.providers.iter().find(|p| p.kind() == kind)
    }

    /// All registered provider kinds, in registration order
    pub fn kinds(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|p| p.kind()).collect()
    }

    /// Info for every registered provider
    pub fn available(&self) -> Vec<ProviderInfo> {
        self.providers
            .iter()
            .map(|p| ProviderInfo {
                name: p.kind().to_string(),
                description: p.description().to_string(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Title-case a raw address string for display
///
/// Uppercases the first letter of each word and lowercases the rest, where a
/// word starts after any non-letter. Upstream sources report addresses in
/// inconsistent casing ("123 MAIN STREET", "9 broadway").
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;

    for c in s.chars() {
        if c.is_alphabetic() && !prev_is_letter {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        prev_is_letter = c.is_alphabetic();
    }

    out
}
