// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Shared helpers for date/time formatting and timezones.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an IANA timezone name ("Europe/Berlin"). Case-sensitive.
pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}

/// Wall-clock time in `timezone` at instant `now`.
///
/// Unknown timezone names fall back to UTC.
pub fn local_time(timezone: &str, now: DateTime<Utc>) -> NaiveDateTime {
    match parse_timezone(timezone) {
        Some(tz) => now.with_timezone(&tz).naive_local(),
        None => now.naive_utc(),
    }
}

/// Format a unix timestamp in `timezone` with `fmt`.
pub fn format_unix_local(timestamp: i64, timezone: &str, fmt: &str) -> String {
    let Some(utc) = DateTime::<Utc>::from_timestamp(timestamp, 0) else {
        return String::new();
    };
    local_time(timezone, utc).format(fmt).to_string()
}
