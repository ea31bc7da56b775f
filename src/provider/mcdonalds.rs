//! McDonald's restaurant locator provider
//!
//! Queries the public store-locator endpoint used by the mcdonalds.com map.
//! The response is a GeoJSON-style feature collection; each feature carries
//! facility filter tags, a coordinate pair, an address line, and a free-text
//! "drive today hours" string in local wall-clock time.
//!
//! Only features tagged with a drive-thru facility are kept.

use crate::constants::api::MCDONALDS_URL;
use crate::constants::upstream::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};
use crate::geo::{self, Coordinates};
use crate::hours;
use crate::provider::{title_case, Location, ProviderKind};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Facility tag marking a store as drive-thru capable
const DRIVE_THRU_TAG: &str = "DRIVETHRU";

/// McDonald's provider
#[derive(Debug)]
pub struct McDonalds {
    client: reqwest::Client,
    base_url: String,
}

/// Store locator response: a feature collection
#[derive(Debug, Deserialize)]
struct LocatorResponse {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Properties,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Properties {
    /// Facility filter tags, e.g. ["WIFI", "DRIVETHRU", "PLAYPLACE"]
    #[serde(rename = "filterType", default)]
    filter_type: Vec<String>,

    #[serde(rename = "addressLine1")]
    address_line1: String,

    /// Today's drive-thru hours as "HH:MM - HH:MM" local time.
    /// Not present on every store, but required for drive-thru ones.
    #[serde(rename = "driveTodayHours")]
    drive_today_hours: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// GeoJSON order: [longitude, latitude]
    coordinates: [f64; 2],
}

impl McDonalds {
    /// Create a new McDonald's provider
    pub fn new() -> Self {
        Self::with_base_url(MCDONALDS_URL)
    }

    /// Create a provider pointed at a different locator endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build the upstream locator URL
    ///
    /// The endpoint takes its search radius in kilometers.
    fn request_url(&self, query: Coordinates, radius_miles: f64, max_results: usize) -> String {
        format!(
            "{}?method=searchLocation&latitude={}&longitude={}&radius={}&maxResults={}&country=us&language=en-us",
            self.base_url,
            query.lat,
            query.lng,
            geo::miles_to_km(radius_miles),
            max_results
        )
    }

    /// Query the locator for drive-thru stores near a point
    pub async fn get_locations(
        &self,
        query: Coordinates,
        radius_miles: f64,
        max_results: usize,
    ) -> Result<Vec<Location>> {
        let url = self.request_url(query, radius_miles, max_results);
        debug!("Fetching McDonald's locations: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("McDonald's request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "McDonald's API returned status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("Failed to read McDonald's response: {}", e)))?;

        Self::parse_locations(&body, query, max_results, Utc::now())
    }

    /// Parse a locator response body into canonical records
    ///
    /// Features without the drive-thru tag are dropped. Any malformed
    /// feature fails the whole parse so a response never yields a mix of
    /// valid and corrupted records. The result is sorted ascending by raw
    /// distance, rounded for display, and truncated to `max_results`.
    fn parse_locations(
        body: &str,
        query: Coordinates,
        max_results: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<Location>> {
        let data: LocatorResponse = serde_json::from_str(body)
            .map_err(|e| Error::UpstreamParse(format!("Bad McDonald's response: {}", e)))?;

        let mut locations = Vec::new();

        for feature in data.features {
            if !feature
                .properties
                .filter_type
                .iter()
                .any(|t| t == DRIVE_THRU_TAG)
            {
                continue;
            }

            let [lng, lat] = feature.geometry.coordinates;
            let coords = Coordinates::new(lat, lng);

            let hours_text = feature.properties.drive_today_hours.ok_or_else(|| {
                Error::UpstreamParse("Drive-thru store missing driveTodayHours".to_string())
            })?;

            let status = match hours::timezone_at(lat, lng) {
                Ok(tz) => hours::resolve_open_status(&hours_text, tz, now)?,
                Err(e) => {
                    // Best effort: evaluate the local-time range as if it
                    // were UTC rather than dropping the store.
                    warn!("Timezone fallback for ({}, {}): {}", lat, lng, e);
                    hours::resolve_open_status(&hours_text, chrono_tz::UTC, now)?
                }
            };

            locations.push(Location {
                kind: ProviderKind::Mcdonalds,
                address: title_case(&feature.properties.address_line1),
                lat,
                lng,
                distance_miles: geo::haversine_miles(query, coords),
                is_open: status.is_open,
                open_time: status.open_time,
                close_time: status.close_time,
            });
        }

        locations.sort_by(|a, b| {
            a.distance_miles
                .partial_cmp(&b.distance_miles)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        locations.truncate(max_results);

        for loc in &mut locations {
            loc.distance_miles = geo::round2(loc.distance_miles);
        }

        Ok(locations)
    }
}

impl Default for McDonalds {
    fn default() -> Self {
        Self::new()
    }
}
