//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default search radius in miles
pub const DEFAULT_RADIUS_MILES: f64 = 5.0;

/// Largest accepted search radius in miles
pub const MAX_RADIUS_MILES: f64 = 25.0;

/// Default per-provider result cap
pub const DEFAULT_MAX_RESULTS: usize = 30;

/// Largest accepted per-provider result cap
pub const MAX_MAX_RESULTS: usize = 30;

/// Default CLI output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7979;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "drivethru-finder";
