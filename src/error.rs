//! Error types for drivethru-finder

use thiserror::Error;

/// Main error type for drivethru-finder operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Upstream transport error: {0}")]
    Transport(String),

    #[error("Upstream parse error: {0}")]
    UpstreamParse(String),

    #[error("Timezone lookup failed: {0}")]
    TimezoneLookup(String),

    #[error("Invalid hours string: {0}")]
    HoursParse(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    #[error("Invalid max results: {0}")]
    InvalidMaxResults(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for drivethru-finder operations
pub type Result<T> = std::result::Result<T, Error>;
