//! Epoch-second helpers: turn `created_utc` values into UTC microsecond
//! instants and render them for logs and CSV output.

use polars::prelude::{DataType, TimeUnit, TimeZone};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

/// strftime pattern handed to the CSV writer for datetime columns.
/// `%.f` prints nothing for whole seconds.
pub const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%:z";

const WHOLE_SECONDS: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
);
const FRACTIONAL_SECONDS: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6][offset_hour sign:mandatory]:[offset_minute]"
);

/// Column type of `created_time`.
pub fn utc_datetime() -> DataType {
    DataType::Datetime(TimeUnit::Microseconds, Some(TimeZone::UTC))
}

/// Seconds since the UNIX epoch -> microseconds, rounded.
/// `None` for non-finite values and instants outside the representable calendar.
pub fn epoch_seconds_to_micros(secs: f64) -> Option<i64> {
    if !secs.is_finite() {
        return None;
    }
    let micros = (secs * 1e6).round();
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }
    let micros = micros as i64;
    micros_to_utc(micros).map(|_| micros)
}

pub fn micros_to_utc(micros: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(micros) * 1_000).ok()
}

/// `2023-11-14 22:13:20+00:00`, with microseconds only when non-zero.
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    let fmt = if ts.nanosecond() == 0 { WHOLE_SECONDS } else { FRACTIONAL_SECONDS };
    ts.format(fmt).unwrap_or_else(|_| ts.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_1700000000_is_2023() {
        let us = epoch_seconds_to_micros(1_700_000_000.0).unwrap();
        assert_eq!(us, 1_700_000_000_000_000);
        let ts = micros_to_utc(us).unwrap();
        assert_eq!(ts.year(), 2023);
        assert_eq!(format_timestamp(ts), "2023-11-14 22:13:20+00:00");
    }

    #[test]
    fn fractional_seconds_survive() {
        let us = epoch_seconds_to_micros(1_700_000_000.5).unwrap();
        assert_eq!(us, 1_700_000_000_500_000);
        assert_eq!(format_timestamp(micros_to_utc(us).unwrap()), "2023-11-14 22:13:20.500000+00:00");
        assert_eq!(micros_to_utc(0), Some(OffsetDateTime::UNIX_EPOCH));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(epoch_seconds_to_micros(f64::NAN).is_none());
        assert!(epoch_seconds_to_micros(f64::INFINITY).is_none());
        assert!(epoch_seconds_to_micros(1e300).is_none());
        // past year 9999
        assert!(epoch_seconds_to_micros(400_000_000_000.0).is_none());
    }
}
