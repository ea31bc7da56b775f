//! Centralized constants for the drivethru-finder crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers (WGS84 approximation)
    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    /// Kilometers per statute mile
    pub const KM_PER_MILE: f64 = 1.609344;
}

/// External API endpoints
pub mod api {
    /// McDonald's restaurant locator API
    pub const MCDONALDS_URL: &str =
        "https://www.mcdonalds.com/googleapps/GoogleRestaurantLocAction.do";
}

/// Upstream HTTP client settings
pub mod upstream {
    /// Per-call timeout for provider requests in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;

    /// User agent sent on provider requests
    pub const USER_AGENT: &str = "drivethru-finder/0.1.0";
}
