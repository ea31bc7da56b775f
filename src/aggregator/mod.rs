//! Provider aggregation
//!
//! Fans a validated search out to the requested providers, isolates
//! per-provider failures, and concatenates the results.

use crate::config::defaults::{
    DEFAULT_MAX_RESULTS, DEFAULT_RADIUS_MILES, MAX_MAX_RESULTS, MAX_RADIUS_MILES,
};
use crate::error::{Error, Result};
use crate::geo::Coordinates;
use crate::provider::{Location, ProviderKind, ProviderRegistry};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A validated, normalized search
///
/// Build one with [`SearchQuery::build`]; it owns the request-boundary
/// validation so the aggregator itself can assume well-formed input.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub center: Coordinates,
    pub radius_miles: f64,
    pub max_results: usize,
    /// Providers to query, in request order
    pub types: Vec<ProviderKind>,
}

impl SearchQuery {
    /// Validate and normalize raw request values
    ///
    /// Unset fields take their documented defaults: radius 5.0 miles, max
    /// results 30, types = every registered provider. Bounds: radius in
    /// (0, 25], max results in [1, 30]. Duplicate types collapse to their
    /// first occurrence so provider iteration order stays deterministic.
    pub fn build(
        center: Coordinates,
        radius_miles: Option<f64>,
        max_results: Option<usize>,
        types: Option<Vec<ProviderKind>>,
        registry: &ProviderRegistry,
    ) -> Result<Self> {
        center.validate()?;

        let radius_miles = radius_miles.unwrap_or(DEFAULT_RADIUS_MILES);
        if radius_miles <= 0.0 || radius_miles > MAX_RADIUS_MILES {
            return Err(Error::InvalidRadius(format!(
                "Radius {} is out of range (0, {}]",
                radius_miles, MAX_RADIUS_MILES
            )));
        }

        let max_results = max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        if max_results < 1 || max_results > MAX_MAX_RESULTS {
            return Err(Error::InvalidMaxResults(format!(
                "Max results {} is out of range [1, {}]",
                max_results, MAX_MAX_RESULTS
            )));
        }

        let mut requested = match types {
            Some(t) if !t.is_empty() => t,
            _ => registry.kinds(),
        };
        let mut seen = Vec::with_capacity(requested.len());
        requested.retain(|k| {
            if seen.contains(k) {
                false
            } else {
                seen.push(*k);
                true
            }
        });

        for kind in &requested {
            if registry.get(*kind).is_none() {
                return Err(Error::UnknownProvider(kind.to_string()));
            }
        }

        Ok(Self {
            center,
            radius_miles,
            max_results,
            types: requested,
        })
    }
}

/// Combined result across all requested providers
///
/// `locations` is each provider's pre-sorted list concatenated in
/// requested-type order; there is no global re-sort and `max_results` caps
/// each provider independently. `errors` holds one message per failed
/// provider and is omitted from JSON when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub locations: Vec<Location>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Fans queries out to registered providers
#[derive(Debug)]
pub struct Aggregator {
    registry: ProviderRegistry,
}

impl Aggregator {
    /// Create an aggregator over a registry
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Run a search against every provider named in the query
    ///
    /// A failing provider contributes zero locations and one error message;
    /// it never aborts the remaining providers. All providers failing still
    /// yields a well-formed (empty) result.
    pub async fn aggregate(&self, query: &SearchQuery) -> AggregateResult {
        let mut locations = Vec::new();
        let mut errors = Vec::new();

        for kind in &query.types {
            let Some(provider) = self.registry.get(*kind) else {
                // Pre-validated queries never reach this; direct callers can.
                errors.push(format!("{}: provider not registered", kind));
                continue;
            };

            match provider
                .get_locations(query.center, query.radius_miles, query.max_results)
                .await
            {
                Ok(mut locs) => locations.append(&mut locs),
                Err(e) => {
                    warn!("Provider {} failed: {}", kind, e);
                    errors.push(e.to_string());
                }
            }
        }

        AggregateResult { locations, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{mcdonalds::McDonalds, Provider};
    use axum::routing::get;
    use axum::Router;
    use tokio::net::TcpListener;

    const FIXTURE_BODY: &str = r#"{
        "features": [
            {
                "properties": {
                    "filterType": ["DRIVETHRU"],
                    "addressLine1": "1856 E JERICHO TPKE",
                    "driveTodayHours": "05:00 - 23:00"
                },
                "geometry": {"coordinates": [-73.3164, 40.8813]}
            },
            {
                "properties": {
                    "filterType": ["DRIVETHRU"],
                    "addressLine1": "839 WALT WHITMAN RD",
                    "driveTodayHours": "05:00 - 05:00"
                },
                "geometry": {"coordinates": [-73.3454, 40.8275]}
            }
        ]
    }"#;

    /// Serve a canned locator response on an ephemeral local port
    async fn spawn_fixture_server(body: &'static str) -> String {
        let app = Router::new().route("/locator", get(move || async move { body }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/locator", addr)
    }

    fn fixture_registry(base_url: String) -> ProviderRegistry {
        let mut registry = ProviderRegistry::new();
        registry.register(Provider::Mcdonalds(McDonalds::with_base_url(base_url)));
        registry
    }

    fn query(registry: &ProviderRegistry) -> SearchQuery {
        SearchQuery::build(Coordinates::new(40.8768, -73.3246), None, None, None, registry)
            .unwrap()
    }

    #[test]
    fn test_build_applies_defaults() {
        let registry = ProviderRegistry::with_defaults();
        let q = SearchQuery::build(Coordinates::new(1.0, -2.0), None, None, None, &registry)
            .unwrap();

        assert_eq!(q.radius_miles, 5.0);
        assert_eq!(q.max_results, 30);
        assert_eq!(q.types, vec![ProviderKind::Mcdonalds]);
    }

    #[test]
    fn test_build_empty_types_means_all() {
        let registry = ProviderRegistry::with_defaults();
        let q = SearchQuery::build(
            Coordinates::new(1.0, -2.0),
            None,
            None,
            Some(Vec::new()),
            &registry,
        )
        .unwrap();

        assert_eq!(q.types, vec![ProviderKind::Mcdonalds]);
    }

    #[test]
    fn test_build_rejects_bad_coordinates() {
        let registry = ProviderRegistry::with_defaults();
        let err = SearchQuery::build(Coordinates::new(500.0, 0.0), None, None, None, &registry)
            .unwrap_err();

        assert!(matches!(err, Error::InvalidCoordinates(_)));
    }

    #[test]
    fn test_build_rejects_bad_radius() {
        let registry = ProviderRegistry::with_defaults();

        for radius in [0.0, -1.0, 25.1] {
            let err = SearchQuery::build(
                Coordinates::new(1.0, -2.0),
                Some(radius),
                None,
                None,
                &registry,
            )
            .unwrap_err();
            assert!(matches!(err, Error::InvalidRadius(_)));
        }
    }

    #[test]
    fn test_build_rejects_bad_max_results() {
        let registry = ProviderRegistry::with_defaults();

        for max in [0, 31] {
            let err = SearchQuery::build(
                Coordinates::new(1.0, -2.0),
                None,
                Some(max),
                None,
                &registry,
            )
            .unwrap_err();
            assert!(matches!(err, Error::InvalidMaxResults(_)));
        }
    }

    #[test]
    fn test_build_rejects_unregistered_type() {
        let registry = ProviderRegistry::new();
        let err = SearchQuery::build(
            Coordinates::new(1.0, -2.0),
            None,
            None,
            Some(vec![ProviderKind::Mcdonalds]),
            &registry,
        )
        .unwrap_err();

        assert!(matches!(err, Error::UnknownProvider(_)));
    }

    #[tokio::test]
    async fn test_aggregate_success() {
        let url = spawn_fixture_server(FIXTURE_BODY).await;
        let aggregator = Aggregator::new(fixture_registry(url));
        let q = query(aggregator.registry());

        let result = aggregator.aggregate(&q).await;

        assert!(result.errors.is_empty());
        assert_eq!(result.locations.len(), 2);
        assert!(result.locations[0].distance_miles <= result.locations[1].distance_miles);
        assert!(result
            .locations
            .iter()
            .all(|l| l.kind == ProviderKind::Mcdonalds));
    }

    #[tokio::test]
    async fn test_aggregate_provider_failure_is_isolated() {
        // Nothing listens here, so the provider fails at transport
        let aggregator =
            Aggregator::new(fixture_registry("http://127.0.0.1:1/locator".to_string()));
        let q = query(aggregator.registry());

        let result = aggregator.aggregate(&q).await;

        assert!(result.locations.is_empty());
        assert_eq!(result.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_aggregate_unregistered_kind_collects_error() {
        let aggregator = Aggregator::new(ProviderRegistry::new());
        let q = SearchQuery {
            center: Coordinates::new(1.0, -2.0),
            radius_miles: 5.0,
            max_results: 30,
            types: vec![ProviderKind::Mcdonalds],
        };

        let result = aggregator.aggregate(&q).await;

        assert!(result.locations.is_empty());
        assert_eq!(result.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_aggregate_result_json_roundtrip() {
        let url = spawn_fixture_server(FIXTURE_BODY).await;
        let aggregator = Aggregator::new(fixture_registry(url));
        let q = query(aggregator.registry());

        let result = aggregator.aggregate(&q).await;
        let json = serde_json::to_string(&result).unwrap();
        let parsed: AggregateResult = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, result);
        // Empty error list is omitted entirely
        assert!(!json.contains("errors"));
    }
}
