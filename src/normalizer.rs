use chrono::{DateTime, FixedOffset};
use tracing::warn;

use crate::errors::TelemetryError;

const NANOS_PER_MILLI: i128 = 1_000_000;
const NANOS_PER_SEC: i128 = 1_000_000_000;
const LEAP_NANOS: u32 = 1_000_000_000;

// RFC 3339 covers `Z` and `+HH:MM`; this one picks up compact `+HHMM` offsets.
const COMPACT_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Convert an ISO-8601 timestamp carrying `Z` or a numeric offset into
/// milliseconds since the epoch, truncated toward zero.
///
/// "2023-10-15T14:30:25.123Z" -> 1697380225123
pub fn iso_to_epoch_millis(iso_timestamp: &str) -> Result<i64, TelemetryError> {
    let parsed = parse_iso(iso_timestamp).map_err(|err| {
        warn!(timestamp = iso_timestamp, error = %err, "invalid ISO timestamp format");
        TelemetryError::MalformedTimestamp {
            value: iso_timestamp.to_string(),
            reason: err,
        }
    })?;
    Ok(truncated_millis(&parsed))
}

fn parse_iso(s: &str) -> Result<DateTime<FixedOffset>, String> {
    let s = s.trim();
    let parsed = DateTime::parse_from_rfc3339(s)
        .or_else(|rfc_err| {
            DateTime::parse_from_str(s, COMPACT_OFFSET_FORMAT).map_err(|_| rfc_err)
        })
        .map_err(|err| err.to_string())?;
    // chrono folds `:60` into the following second
    if parsed.timestamp_subsec_nanos() >= LEAP_NANOS {
        return Err("leap seconds are not supported".to_string());
    }
    Ok(parsed)
}

// `timestamp_millis` floors pre-epoch instants, so divide total nanos instead.
fn truncated_millis(dt: &DateTime<FixedOffset>) -> i64 {
    let nanos =
        i128::from(dt.timestamp()) * NANOS_PER_SEC + i128::from(dt.timestamp_subsec_nanos());
    (nanos / NANOS_PER_MILLI) as i64
}
