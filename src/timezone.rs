use time::{OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};
use time_tz::{Offset, TimeZone};

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current wall-clock time in `canonical_timezone`, truncated to minute
/// precision to match the ledger timestamp format.
///
/// An unknown timezone name falls back to UTC with a warning rather than
/// refusing to record the entry.
pub fn local_now(canonical_timezone: &str) -> PrimitiveDateTime {
    let offset = match get_local_offset(canonical_timezone) {
        Some(offset) => offset,
        None => {
            tracing::warn!("unknown timezone \"{canonical_timezone}\", falling back to UTC");
            UtcOffset::UTC
        }
    };

    let now = OffsetDateTime::now_utc().to_offset(offset);
    let minute = Time::from_hms(now.hour(), now.minute(), 0)
        .expect("hour and minute came from a valid time");

    PrimitiveDateTime::new(now.date(), minute)
}
