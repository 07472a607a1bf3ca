//! Date parsing for the formats found in upstream banking and retail feeds.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Spanish month abbreviations as they appear in fragmented dates.
const MONTHS: [(&str, u32); 12] = [
    ("ENE", 1),
    ("FEB", 2),
    ("MAR", 3),
    ("ABR", 4),
    ("MAY", 5),
    ("JUN", 6),
    ("JUL", 7),
    ("AGO", 8),
    ("SEP", 9),
    ("OCT", 10),
    ("NOV", 11),
    ("DIC", 12),
];

const DATE_FORMATS: [&str; 6] = [
    "%d/%b/%Y", "%d/%m/%Y", "%Y%m%d", "%d-%m-%Y", "%Y-%m-%d", "%Y/%m/%d",
];

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];

/// Builds a date from `("31", "DIC", "2016")`-style fragments.
///
/// The month may be a Spanish abbreviation or a number; two-digit years are
/// taken as 20xx.
#[must_use]
pub fn parse_date_parts(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let month = month.trim().to_uppercase();
    let month = MONTHS
        .iter()
        .find(|(abbreviation, _)| *abbreviation == month)
        .map(|(_, number)| *number)
        .or_else(|| month.parse().ok())?;

    let year = year.trim();
    let year: i32 = if year.len() == 2 {
        format!("20{year}").parse().ok()?
    } else {
        year.parse().ok()?
    };

    NaiveDate::from_ymd_opt(year, month, day.trim().parse().ok()?)
}

/// Parses a date in any of `dd/Mon/yyyy`, `dd/mm/yyyy`, `yyyymmdd`,
/// `dd-mm-yyyy`, `yyyy-mm-dd` or `yyyy/mm/dd`.
#[must_use]
pub fn parse_str_date(arg: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(arg, format).ok())
}

/// Parses a date-time; plain dates resolve to midnight.
///
/// Accepts the date formats of [`parse_str_date`], ISO-8601 timestamps with or
/// without fractional seconds and a trailing `Z`, `yyyy-mm-dd HH:MM:SS`, and
/// RFC 3339 with an offset (kept as local wall time).
#[must_use]
pub fn parse_str_datetime(arg: &str) -> Option<NaiveDateTime> {
    parse_str_date(arg)
        .map(|date| date.and_time(NaiveTime::MIN))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(arg, format).ok())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(arg)
                .ok()
                .map(|datetime| datetime.naive_local())
        })
}
