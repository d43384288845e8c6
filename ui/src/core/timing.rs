//! Wall-clock helpers shared by history records.

use time::{OffsetDateTime, UtcOffset};

/// Current time as epoch milliseconds.
pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Interpret epoch milliseconds in the local offset (UTC when unknown).
pub fn local_datetime(epoch_millis: i64) -> Option<OffsetDateTime> {
    let utc =
        OffsetDateTime::from_unix_timestamp_nanos(epoch_millis as i128 * 1_000_000).ok()?;
    let offset = UtcOffset::local_offset_at(utc).unwrap_or(UtcOffset::UTC);
    Some(utc.to_offset(offset))
}
