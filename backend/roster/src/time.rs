//! # Reference Time Zone
//!
//! Every day boundary in the system is computed in one fixed zone, so the server
//! and scanners agree on "today" regardless of where they physically run.
//!
//! - Same-day duplicate detection compares [`calendar_day`] values.
//! - Export renders timestamps with [`format_timestamp`].
//! - The daily counter sleeps for [`until_next_midnight`] before each rollover.
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Asia::Hong_Kong;
pub const DAY_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ONE_DAY: Duration = Duration::from_secs(24 * 60 * 60);

pub fn calendar_day(timestamp: &DateTime<Utc>, zone: Tz) -> NaiveDate {
    timestamp.with_timezone(&zone).date_naive()
}

pub fn day_label(timestamp: &DateTime<Utc>, zone: Tz) -> String {
    calendar_day(timestamp, zone).format(DAY_FORMAT).to_string()
}

pub fn format_timestamp(timestamp: &DateTime<Utc>, zone: Tz) -> String {
    timestamp
        .with_timezone(&zone)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// First instant of `date` in `zone`. A midnight skipped by a DST jump resolves
/// to the first local time that exists that day.
pub fn start_of_day(date: NaiveDate, zone: Tz) -> Option<DateTime<Utc>> {
    let midnight = date.and_time(NaiveTime::MIN);

    (0..24).find_map(|hour| {
        zone.from_local_datetime(&(midnight + TimeDelta::hours(hour)))
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    })
}

pub fn until_next_midnight(now: DateTime<Utc>, zone: Tz) -> Duration {
    let next = calendar_day(&now, zone)
        .succ_opt()
        .and_then(|tomorrow| start_of_day(tomorrow, zone));

    match next {
        Some(midnight) => (midnight - now).to_std().unwrap_or(Duration::ZERO),
        None => ONE_DAY,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_day_follows_reference_zone() {
        // 15:59 UTC is 23:59 in Hong Kong, 16:00 UTC is already the next day there
        assert_eq!(
            day_label(&utc("2024-03-01T15:59:59Z"), DEFAULT_TIME_ZONE),
            "2024-03-01"
        );
        assert_eq!(
            day_label(&utc("2024-03-01T16:00:00Z"), DEFAULT_TIME_ZONE),
            "2024-03-02"
        );
    }

    #[test]
    fn test_offset_input_is_normalized() {
        let from_offset: DateTime<Utc> = "2024-03-02T00:30:00+08:00".parse().unwrap();
        assert_eq!(day_label(&from_offset, DEFAULT_TIME_ZONE), "2024-03-02");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(&utc("2024-03-01T01:02:03.456Z"), DEFAULT_TIME_ZONE),
            "2024-03-01 09:02:03"
        );
    }

    #[test]
    fn test_until_next_midnight() {
        assert_eq!(
            until_next_midnight(utc("2024-03-01T15:59:59Z"), DEFAULT_TIME_ZONE),
            Duration::from_secs(1)
        );
        assert_eq!(
            until_next_midnight(utc("2024-03-01T16:00:00Z"), DEFAULT_TIME_ZONE),
            Duration::from_secs(24 * 60 * 60)
        );
    }

    #[test]
    fn test_dst_day_is_shorter() {
        // New York springs forward on 2024-03-10, so that midnight is 23 hours after the previous one
        let zone = chrono_tz::America::New_York;
        assert_eq!(
            until_next_midnight(utc("2024-03-10T05:00:00Z"), zone),
            Duration::from_secs(23 * 60 * 60)
        );
    }
}
