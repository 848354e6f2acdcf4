//! Conditional request handling
//!
//! `Last-Modified` / `If-Modified-Since` revalidation. Together with the
//! `Cache-Control: no-cache` stamp this gives browsers cheap 304s during
//! development instead of re-downloading unchanged wasm binaries.

use chrono::{DateTime, TimeZone, Utc};
use std::time::SystemTime;

/// Format a filesystem timestamp as an HTTP date (RFC 7231 IMF-fixdate).
pub fn http_date(time: SystemTime) -> String {
    let time: DateTime<Utc> = time.into();
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an `If-Modified-Since` header value.
///
/// Only the RFC 1123 form is accepted; the obsolete RFC 850 and asctime
/// forms are treated as absent.
fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Decide whether a request can be answered with `304 Not Modified`.
///
/// True when the client date is no older than the file mtime, compared at
/// second granularity since HTTP dates cannot carry sub-second precision.
pub fn not_modified(if_modified_since: Option<&str>, mtime: SystemTime) -> bool {
    let Some(client_date) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };

    let mtime: DateTime<Utc> = mtime.into();
    let Some(mtime) = Utc.timestamp_opt(mtime.timestamp(), 0).single() else {
        return false;
    };

    mtime <= client_date
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn system_time(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_http_date_format() {
        let date = http_date(SystemTime::UNIX_EPOCH);
        assert_eq!(date, "Thu, 01 Jan 1970 00:00:00 GMT");
    }

    #[test]
    fn test_round_trip_is_not_modified() {
        let mtime = system_time(1_700_000_000);
        let date = http_date(mtime);
        assert!(not_modified(Some(&date), mtime));
    }

    #[test]
    fn test_newer_file_is_modified() {
        let mtime = system_time(1_700_000_100);
        let client_date = http_date(system_time(1_700_000_000));
        assert!(!not_modified(Some(&client_date), mtime));
    }

    #[test]
    fn test_older_file_is_not_modified() {
        let mtime = system_time(1_700_000_000);
        let client_date = http_date(system_time(1_700_000_100));
        assert!(not_modified(Some(&client_date), mtime));
    }

    #[test]
    fn test_missing_or_malformed_header() {
        let mtime = system_time(1_700_000_000);
        assert!(!not_modified(None, mtime));
        assert!(!not_modified(Some("not a date"), mtime));
    }

    #[test]
    fn test_subsecond_mtime_truncated() {
        let mtime = system_time(1_700_000_000) + Duration::from_millis(750);
        let client_date = http_date(system_time(1_700_000_000));
        assert!(not_modified(Some(&client_date), mtime));
    }
}
