//! This module contains auxiliary parsers for flag values

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;

/// Parses a decimal number, rejecting anything that is not a finite value
pub(crate) fn parse_number(value: &str) -> Option<f64> {
    match f64::from_str(value.trim()) {
        Ok(x) if x.is_finite() => Some(x),
        _ => None,
    }
}

/// Only a case insensitive `true` is true, anything else is false
pub(crate) fn parse_boolean(value: &str) -> bool {
    value.to_lowercase() == "true"
}

/// Parses a date or a date and time
///
/// Accepted, in order:
/// - RFC 3339 (`2024-03-01T10:00:00+01:00`)
/// - `2024-03-01T10:00:00` and `2024-03-01T10:00`, taken as UTC
/// - `2024-03-01` or `2024/03/01`, at UTC midnight
/// - `2024-03` or `2024/03`, the first day of the month
pub(crate) fn parse_str_as_date(date: &str) -> Option<DateTime<Utc>> {
    lazy_static! {
        static ref RE_MONTH: Regex = Regex::new(r"^(\d{4})[/-](\d\d?)$").unwrap();
        static ref RE_DATE: Regex = Regex::new(r"^(\d{4})[/-](\d\d?)[/-](\d\d?)$").unwrap();
    }
    if let Ok(x) = DateTime::parse_from_rfc3339(date) {
        return Some(x.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"].iter() {
        if let Ok(x) = NaiveDateTime::parse_from_str(date, format) {
            return Some(Utc.from_utc_datetime(&x));
        }
    }
    if let Some(captures) = RE_DATE.captures(date) {
        midnight(
            captures[1].parse().ok()?,
            captures[2].parse().ok()?,
            captures[3].parse().ok()?,
        )
    } else if let Some(captures) = RE_MONTH.captures(date) {
        midnight(captures[1].parse().ok()?, captures[2].parse().ok()?, 1)
    } else {
        None
    }
}

fn midnight(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// Start of the UTC day of the given instant
pub fn start_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    let date = instant.date_naive();
    match date.and_hms_opt(0, 0, 0) {
        Some(x) => Utc.from_utc_datetime(&x),
        None => instant,
    }
}
