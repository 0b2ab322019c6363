//! Normalization of Apple Core Data timestamps.
//!
//! iOS stores `message.date` as an offset from 2001-01-01 (not the Unix
//! epoch) in nanoseconds; older backups carry whole seconds instead. This
//! module normalizes both encodings and downgrades anything unparseable to
//! an explicit "unknown" marker.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rusqlite::types::Value;

/// Values above this are treated as nanoseconds, at or below as seconds.
///
/// The split is a heuristic inherited from real backups: it is ambiguous for
/// instants between ~8.8 hours and ~31,688 years after the epoch, which no
/// device ever produces. Preserved exactly for fidelity with existing data.
const NANOSECOND_THRESHOLD: i64 = 1_000_000_000_000;

/// Marker rendered for messages whose send time cannot be determined.
pub const UNKNOWN_TIME: &str = "unknown time";

/// The Apple/Core Data reference instant: 2001-01-01T00:00:00.
#[must_use]
pub fn apple_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2001, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("2001-01-01 00:00:00 is a valid timestamp")
}

/// Convert a raw `message.date` column value to a calendar timestamp.
///
/// Returns `None` for null, zero ("not set" in the store), non-numeric
/// values, and offsets that would overflow the calendar; never panics.
/// The result is wall-clock naive: the stored value is taken as already
/// absolute, no timezone conversion is performed.
#[must_use]
pub fn from_apple_timestamp(value: &Value) -> Option<NaiveDateTime> {
    let raw = match value {
        Value::Integer(v) => *v,
        // SQLite returns floats on some OS versions; truncate toward zero.
        Value::Real(v) => *v as i64,
        Value::Text(s) => s.trim().parse::<i64>().ok()?,
        Value::Null | Value::Blob(_) => return None,
    };

    if raw == 0 {
        return None;
    }

    let offset = if raw > NANOSECOND_THRESHOLD {
        Duration::nanoseconds(raw)
    } else {
        Duration::seconds(raw)
    };

    apple_epoch().checked_add_signed(offset)
}

/// Render a normalized timestamp for a transcript line.
#[must_use]
pub fn format_timestamp(timestamp: Option<NaiveDateTime>) -> String {
    match timestamp {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => UNKNOWN_TIME.to_string(),
    }
}
