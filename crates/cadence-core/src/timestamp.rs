//! Strict textual forms for schedule instants.
//!
//! Two fixed-width forms are accepted and nothing else: UTC
//! `YYYY-MM-DDTHH:MM:SSZ` and local-naive `YYYY-MM-DDTHH:MM:SS`. Local-naive
//! text is read as if it were already UTC; the schedule's declared zone is
//! never applied.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{Result, ScheduleError};

const LOCAL_LEN: usize = 19;
const UTC_LEN: usize = 20;

/// Largest instant whose UTC form still has a four-digit year.
pub fn max_representable() -> DateTime<Utc> {
    // 9999-12-31T23:59:59Z
    Utc.timestamp_opt(253_402_300_799, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Parses `YYYY-MM-DDTHH:MM:SSZ`.
pub fn parse_utc(text: &str) -> Result<DateTime<Utc>> {
    let body = text
        .strip_suffix('Z')
        .filter(|_| text.len() == UTC_LEN)
        .ok_or_else(|| ScheduleError::Format(format!("invalid UTC timestamp '{}'", text)))?;
    parse_fields(body)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ScheduleError::Format(format!("invalid UTC timestamp '{}'", text)))
}

/// Parses `YYYY-MM-DDTHH:MM:SS`, taking the numeric fields as UTC.
pub fn parse_local_as_utc(text: &str) -> Result<DateTime<Utc>> {
    if text.len() != LOCAL_LEN {
        return Err(ScheduleError::Format(format!("invalid local datetime '{}'", text)));
    }
    parse_fields(text)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ScheduleError::Format(format!("invalid local datetime '{}'", text)))
}

/// Renders an instant as `YYYY-MM-DDTHH:MM:SSZ`.
///
/// Instants outside years 0000-9999 have no valid rendering; callers keep
/// generation within [`max_representable`], so hitting that case is a bug.
pub fn format_utc(instant: DateTime<Utc>) -> String {
    debug_assert!(instant <= max_representable(), "instant beyond year 9999");
    instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn parse_fields(text: &str) -> Option<NaiveDateTime> {
    let bytes = text.as_bytes();
    if bytes.len() != LOCAL_LEN {
        return None;
    }
    let separators = [(4, b'-'), (7, b'-'), (10, b'T'), (13, b':'), (16, b':')];
    if separators.iter().any(|&(idx, sep)| bytes[idx] != sep) {
        return None;
    }

    let number = |range: std::ops::Range<usize>| -> Option<u32> {
        let digits = &bytes[range];
        if !digits.iter().all(u8::is_ascii_digit) {
            return None;
        }
        Some(digits.iter().fold(0, |acc, d| acc * 10 + u32::from(d - b'0')))
    };

    let year = number(0..4)?;
    let month = number(5..7)?;
    let day = number(8..10)?;
    let hour = number(11..13)?;
    let minute = number(14..16)?;
    let second = number(17..19)?;

    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?.and_hms_opt(hour, minute, second)
}
