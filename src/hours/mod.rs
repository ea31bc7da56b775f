//! Opening-hours resolution
//!
//! Providers report opening hours as local wall-clock ranges like
//! `"05:00 - 23:00"` with no UTC offset attached. Deciding whether a
//! restaurant is open right now therefore requires the physical timezone of
//! the restaurant's coordinate, never the server's ambient timezone.
//!
//! Rules, matching the upstream data conventions:
//! - open time equal to close time means open 24 hours
//! - a close hour numerically below the open hour means the range spans
//!   midnight (e.g. `"20:00 - 04:00"`)

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Delimiter between the open and close times in provider hours strings
const RANGE_DELIMITER: &str = " - ";

/// Open/closed status of a location at a point in time
///
/// `open_time` and `close_time` are either both present or both absent;
/// absent means the location is open 24 hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenStatus {
    pub is_open: bool,
    pub open_time: Option<DateTime<Utc>>,
    pub close_time: Option<DateTime<Utc>>,
}

impl OpenStatus {
    /// Status for a location with no bounded daily schedule
    pub fn always_open() -> Self {
        Self {
            is_open: true,
            open_time: None,
            close_time: None,
        }
    }
}

/// Resolve the IANA timezone for a coordinate
///
/// Failure here is recoverable: callers are expected to degrade to a
/// best-effort status rather than drop the location.
pub fn timezone_at(lat: f64, lng: f64) -> Result<Tz> {
    let name = tz_search::lookup(lat, lng).ok_or_else(|| {
        Error::TimezoneLookup(format!("no timezone found for ({}, {})", lat, lng))
    })?;

    name.parse::<Tz>()
        .map_err(|e| Error::TimezoneLookup(format!("unknown timezone {}: {}", name, e)))
}

/// Resolve open/closed status from a provider hours string
///
/// # Arguments
/// * `hours` - local time range in `"HH:MM - HH:MM"` form
/// * `tz` - the location's own timezone
/// * `now_utc` - the instant to evaluate against
///
/// Equal open and close times mean open 24 hours (no instants returned).
/// Overnight ranges resolve to whichever window is relevant now: during the
/// early-morning tail the window that opened yesterday, otherwise the window
/// opening today.
pub fn resolve_open_status(hours: &str, tz: Tz, now_utc: DateTime<Utc>) -> Result<OpenStatus> {
    let (open_text, close_text) = hours.split_once(RANGE_DELIMITER).ok_or_else(|| {
        Error::HoursParse(format!("expected \"HH:MM - HH:MM\", got {:?}", hours))
    })?;

    let open_t = parse_clock(open_text)?;
    let close_t = parse_clock(close_text)?;

    if open_t == close_t {
        return Ok(OpenStatus::always_open());
    }

    let now_local = now_utc.with_timezone(&tz);
    let today = now_local.date_naive();

    let mut open_local = today.and_time(open_t);
    let mut close_local = today.and_time(close_t);

    if close_t.hour() < open_t.hour() {
        // Overnight range. If we are in the early-morning tail (before
        // today's close time), the relevant window opened yesterday.
        if now_local.naive_local() < close_local {
            open_local -= Duration::hours(24);
        } else {
            close_local += Duration::hours(24);
        }
    }

    let open = anchor(tz, open_local)?;
    let close = anchor(tz, close_local)?;

    Ok(OpenStatus {
        is_open: now_local > open && now_local < close,
        open_time: Some(open.with_timezone(&Utc)),
        close_time: Some(close.with_timezone(&Utc)),
    })
}

/// Parse a single "HH:MM" clock reading
fn parse_clock(text: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M")
        .map_err(|e| Error::HoursParse(format!("bad clock time {:?}: {}", text, e)))
}

/// Attach a timezone to a naive local datetime
///
/// DST transitions can make a local time ambiguous or nonexistent; the
/// earliest valid interpretation is used.
fn anchor(tz: Tz, local: chrono::NaiveDateTime) -> Result<DateTime<Tz>> {
    tz.from_local_datetime(&local).earliest().ok_or_else(|| {
        Error::TimezoneLookup(format!("local time {} does not exist in {}", local, tz))
    })
}
