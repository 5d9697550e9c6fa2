//! Serving time zone.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Timelike};

use crate::error::{DataError, Result};

/// Fixed UTC+10 offset, in seconds.
pub const AEST_OFFSET_SECS: i32 = 10 * 3600;

/// Naive layouts accepted by [`parse_timestamp`], tried in order.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Fixed UTC+10 offset used for every timestamp the service reads or emits.
pub fn aest() -> FixedOffset {
    FixedOffset::east_opt(AEST_OFFSET_SECS).expect("UTC+10 is a valid offset")
}

/// Interpret a naive timestamp as AEST wall-clock time.
///
/// Fails with [`DataError::InvalidDate`] when the UTC instant falls outside
/// the representable range.
pub fn localize(naive: NaiveDateTime) -> Result<DateTime<FixedOffset>> {
    // A fixed offset has no gaps or folds.
    naive
        .checked_sub_signed(Duration::seconds(i64::from(AEST_OFFSET_SECS)))
        .map(|utc| aest().from_utc_datetime(&utc))
        .ok_or_else(|| DataError::InvalidDate(format!("{} is out of range", naive)))
}

/// Convert any offset-carrying timestamp to AEST.
pub fn to_aest<Tz: TimeZone>(ts: &DateTime<Tz>) -> DateTime<FixedOffset> {
    ts.with_timezone(&aest())
}

/// Parse RFC 3339 with an offset, or a naive timestamp read as AEST.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(to_aest(&ts));
    }
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| {
            DataError::InvalidDate(format!("expected an ISO-8601 timestamp, got '{}'", raw))
        })?;
    localize(naive)
}

/// Truncate to the start of the hour.
pub fn floor_hour(ts: DateTime<FixedOffset>) -> Result<DateTime<FixedOffset>> {
    ts.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .ok_or_else(|| DataError::InvalidDate(format!("cannot truncate {} to the hour", ts)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_localize_keeps_wall_clock() {
        let naive = NaiveDate::from_ymd_opt(2025, 4, 18)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();
        let ts = localize(naive).unwrap();
        assert_eq!(ts.hour(), 15);
        assert_eq!(ts.offset().local_minus_utc(), AEST_OFFSET_SECS);
        assert_eq!(ts.naive_local(), naive);
    }

    #[test]
    fn test_localize_rejects_earliest_representable_time() {
        let naive = NaiveDateTime::MIN + Duration::hours(5);
        assert!(matches!(localize(naive), Err(DataError::InvalidDate(_))));
    }

    #[test]
    fn test_to_aest_shifts_utc() {
        let utc = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let ts = to_aest(&utc);
        assert_eq!(ts.hour(), 10);
        assert_eq!(ts, utc);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = aest().with_ymd_and_hms(2025, 4, 18, 9, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025-04-18T09:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-04-18 09:00").unwrap(), expected);
        assert_eq!(parse_timestamp(" 2025-04-17T23:00:00Z ").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-04-18T09:00:00+10:00").unwrap(), expected);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(matches!(
            parse_timestamp("next tuesday"),
            Err(DataError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_parse_timestamp_rejects_out_of_range_year() {
        assert!(matches!(
            parse_timestamp("-262143-01-01T05:00:00"),
            Err(DataError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_floor_hour() {
        let ts = aest().with_ymd_and_hms(2025, 4, 18, 9, 47, 12).unwrap();
        let floored = floor_hour(ts).unwrap();
        assert_eq!(floored, aest().with_ymd_and_hms(2025, 4, 18, 9, 0, 0).unwrap());
    }
}
