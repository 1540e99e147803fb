//! Timezone reconciliation between a reporting host and the viewing user.
//!
//! Hosts report event timestamps in their own local time without an offset.
//! To show an event to its owner the timestamp is interpreted in the host's
//! timezone and re-expressed in the owner's timezone. An owner without a
//! timezone sees the host's local time unchanged.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::CoreError;

/// Parse an IANA timezone name (e.g. `"Europe/Warsaw"`).
pub fn parse_timezone(name: &str) -> Result<Tz, CoreError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| CoreError::Validation(format!("Unknown timezone '{name}'")))
}

/// Whether the name belongs to the list offered at registration.
///
/// Common timezones are `UTC` plus the canonical `Area/Location` zones;
/// `Etc/*` and legacy aliases such as `US/Eastern` are excluded.
pub fn is_common_timezone(name: &str) -> bool {
    name == "UTC" || (is_area_location(name) && name.parse::<Tz>().is_ok())
}

/// All common timezone names, sorted.
pub fn common_timezones() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = chrono_tz::TZ_VARIANTS
        .iter()
        .map(|tz| tz.name())
        .filter(|name| *name == "UTC" || is_area_location(name))
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}

const AREAS: &[&str] = &[
    "Africa/",
    "America/",
    "Antarctica/",
    "Arctic/",
    "Asia/",
    "Atlantic/",
    "Australia/",
    "Europe/",
    "Indian/",
    "Pacific/",
];

fn is_area_location(name: &str) -> bool {
    AREAS.iter().any(|area| name.starts_with(area))
}

/// Longest clock jump searched when a local time falls into a gap.
const MAX_GAP_MINUTES: i64 = 48 * 60;

/// Resolve a host-local wall-clock time to a UTC instant.
///
/// Ambiguous times (clocks going back) take the earlier instant. Times that
/// fall into a gap (clocks going forward) resolve to the first valid instant
/// after the gap, e.g. 02:30 on a night when Warsaw jumps from 02:00 to 03:00
/// becomes 03:00 local.
pub fn to_utc(ts: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&ts) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let minute = ts
                .with_second(0)
                .and_then(|t| t.with_nanosecond(0))
                .unwrap_or(ts);
            (1..=MAX_GAP_MINUTES)
                .map(|k| minute + Duration::minutes(k))
                .find_map(|local| tz.from_local_datetime(&local).earliest())
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&ts))
        }
    }
}

/// Express a host-local timestamp in the user's timezone.
///
/// The timestamp is read as host wall-clock time and converted, so a
/// 10:00 event from a Warsaw host in winter shows as 09:00 to a UTC user.
/// `user_timezone` that is `None` or blank falls back to the host timezone.
pub fn localize_timestamp(
    ts: NaiveDateTime,
    host_timezone: &str,
    user_timezone: Option<&str>,
) -> Result<DateTime<Tz>, CoreError> {
    let host_tz = parse_timezone(host_timezone)?;
    let user_tz = match user_timezone.map(str::trim) {
        Some(name) if !name.is_empty() => parse_timezone(name)?,
        _ => host_tz,
    };
    Ok(to_utc(ts, host_tz).with_timezone(&user_tz))
}

/// Formats accepted for reported timestamps, tried in order.
const HOST_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a timestamp as reported by a host.
///
/// The value is host wall-clock time. An RFC 3339 value keeps its local
/// reading and drops the offset; a bare date means midnight.
pub fn parse_host_timestamp(raw: &str) -> Result<NaiveDateTime, CoreError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.naive_local());
    }
    for format in HOST_TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts);
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight);
    }
    Err(CoreError::Validation(format!("Enter a valid date/time: '{raw}'")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn host_to_utc_user() {
        // Warsaw is UTC+1 in January.
        let local = localize_timestamp(at(2024, 1, 15, 10, 0), "Europe/Warsaw", Some("UTC")).unwrap();
        assert_eq!(local.naive_local(), at(2024, 1, 15, 9, 0));
    }

    #[test]
    fn host_offset_is_subtracted_not_added() {
        // Host ahead of the user: the user sees an earlier wall-clock time,
        // never 11:00.
        let local = localize_timestamp(at(2024, 1, 15, 10, 0), "Europe/Warsaw", Some("UTC")).unwrap();
        assert_ne!(local.naive_local(), at(2024, 1, 15, 11, 0));
        // Host behind the user: the user sees a later one.
        let local = localize_timestamp(at(2024, 1, 15, 10, 0), "UTC", Some("Europe/Warsaw")).unwrap();
        assert_eq!(local.naive_local(), at(2024, 1, 15, 11, 0));
    }

    #[test]
    fn host_to_distant_user() {
        // New York (UTC-4 in July) to Tokyo (UTC+9): +13h.
        let local =
            localize_timestamp(at(2024, 7, 1, 8, 30), "America/New_York", Some("Asia/Tokyo"))
                .unwrap();
        assert_eq!(local.naive_local(), at(2024, 7, 1, 21, 30));
    }

    #[test]
    fn blank_user_timezone_keeps_host_time() {
        let ts = at(2024, 3, 1, 12, 0);
        for user in [None, Some(""), Some("  ")] {
            let local = localize_timestamp(ts, "Europe/Berlin", user).unwrap();
            assert_eq!(local.naive_local(), ts);
        }
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        assert_matches!(
            localize_timestamp(at(2024, 1, 1, 0, 0), "Mars/Olympus", None),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            localize_timestamp(at(2024, 1, 1, 0, 0), "UTC", Some("Nowhere")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn ambiguous_time_takes_earlier_instant() {
        // 2:30 on 2024-10-27 happens twice in Warsaw; the first is UTC+2.
        let utc = to_utc(at(2024, 10, 27, 2, 30), parse_timezone("Europe/Warsaw").unwrap());
        assert_eq!(utc.naive_utc(), at(2024, 10, 27, 0, 30));
    }

    #[test]
    fn gap_time_moves_to_end_of_gap() {
        // 2:30 on 2024-03-31 does not exist in Warsaw; clocks go from 2:00
        // CET straight to 3:00 CEST, which is 1:00 UTC.
        let warsaw = parse_timezone("Europe/Warsaw").unwrap();
        let utc = to_utc(at(2024, 3, 31, 2, 30), warsaw);
        assert_eq!(utc.naive_utc(), at(2024, 3, 31, 1, 0));

        let with_seconds = at(2024, 3, 31, 2, 30) + Duration::seconds(15);
        assert_eq!(to_utc(with_seconds, warsaw).naive_utc(), at(2024, 3, 31, 1, 0));

        let local = localize_timestamp(at(2024, 3, 31, 2, 0), "Europe/Warsaw", None).unwrap();
        assert_eq!(local.naive_local(), at(2024, 3, 31, 3, 0));
    }

    #[test]
    fn common_timezone_membership() {
        assert!(is_common_timezone("UTC"));
        assert!(is_common_timezone("Europe/Warsaw"));
        assert!(!is_common_timezone("Etc/GMT+5"));
        assert!(!is_common_timezone("US/Eastern"));
        assert!(!is_common_timezone("Europe/Atlantis"));
    }

    #[test]
    fn common_timezone_list_is_sorted() {
        let names = common_timezones();
        assert!(names.contains(&"America/Sao_Paulo"));
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn host_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_micro_opt(12, 30, 15, 250_000)
            .unwrap();
        assert_eq!(parse_host_timestamp("2024-05-01 12:30:15.250000").unwrap(), expected);
        assert_eq!(parse_host_timestamp("2024-05-01T12:30:15.25").unwrap(), expected);
        assert_eq!(
            parse_host_timestamp("2024-05-01T12:30:15.25+02:00").unwrap(),
            expected
        );
        assert_eq!(
            parse_host_timestamp("2024-05-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
        );
        assert_matches!(parse_host_timestamp("yesterday"), Err(CoreError::Validation(_)));
    }
}
