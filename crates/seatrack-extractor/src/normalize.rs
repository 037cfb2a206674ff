//! Arrival date normalization to `YYYY-MM-DD HH:MM`

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use seatrack_domain::is_unavailable;

const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Whole-value layouts seen in carrier pages and agent answers.
/// The 12-hour layout must come before any match on the bare ISO stamp.
const FULL_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %I:%M %p",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d-%b-%Y %H:%M",
    "%d %b %Y %H:%M",
    "%d %B %Y %H:%M",
];

/// `YYYY-MM-DD HH:MM` (or with `T`) anywhere in a value
static EMBEDDED_STAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})-(\d{2})-(\d{2})[ T](\d{2}):(\d{2})").unwrap()
});

/// Normalize an arrival date/time to `YYYY-MM-DD HH:MM` (24h)
///
/// Returns `None` when no date with a time of day can be recovered; callers
/// store the sentinel in that case.
///
/// # Examples
///
/// ```
/// use seatrack_extractor::normalize_arrival_date;
///
/// assert_eq!(
///     normalize_arrival_date("2025-03-28T10:38:00").as_deref(),
///     Some("2025-03-28 10:38")
/// );
/// assert_eq!(
///     normalize_arrival_date("ETB 2025-03-28 10:38 (local)").as_deref(),
///     Some("2025-03-28 10:38")
/// );
/// assert_eq!(normalize_arrival_date("next Tuesday"), None);
/// ```
pub fn normalize_arrival_date(value: &str) -> Option<String> {
    if is_unavailable(value) {
        return None;
    }

    let trimmed = value.trim().trim_end_matches('Z');
    for format in FULL_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.format(OUTPUT_FORMAT).to_string());
        }
    }

    EMBEDDED_STAMP
        .captures_iter(value)
        .find_map(|caps| {
            let date = NaiveDate::from_ymd_opt(
                caps[1].parse().ok()?,
                caps[2].parse().ok()?,
                caps[3].parse().ok()?,
            )?;
            let time = NaiveTime::from_hms_opt(caps[4].parse().ok()?, caps[5].parse().ok()?, 0)?;
            Some(date.and_time(time))
        })
        .map(|stamp| stamp.format(OUTPUT_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_format_unchanged() {
        assert_eq!(
            normalize_arrival_date("2025-03-28 10:38").as_deref(),
            Some("2025-03-28 10:38")
        );
    }

    #[test]
    fn test_t_separator_and_seconds() {
        assert_eq!(
            normalize_arrival_date("2025-03-28T10:38").as_deref(),
            Some("2025-03-28 10:38")
        );
        assert_eq!(
            normalize_arrival_date("2025-03-28 10:38:59").as_deref(),
            Some("2025-03-28 10:38")
        );
        assert_eq!(
            normalize_arrival_date("2025-03-28T10:38:00.000Z").as_deref(),
            Some("2025-03-28 10:38")
        );
    }

    #[test]
    fn test_twelve_hour_clock() {
        assert_eq!(
            normalize_arrival_date("2025-03-28 10:38 PM").as_deref(),
            Some("2025-03-28 22:38")
        );
    }

    #[test]
    fn test_carrier_layouts() {
        assert_eq!(
            normalize_arrival_date("2025/03/28 10:38").as_deref(),
            Some("2025-03-28 10:38")
        );
        assert_eq!(
            normalize_arrival_date("28-Mar-2025 10:38").as_deref(),
            Some("2025-03-28 10:38")
        );
    }

    #[test]
    fn test_embedded_stamp() {
        assert_eq!(
            normalize_arrival_date("Estimated 2025-03-28 10:38 at NHAVA SHEVA").as_deref(),
            Some("2025-03-28 10:38")
        );
    }

    #[test]
    fn test_invalid_calendar_values_rejected() {
        assert_eq!(normalize_arrival_date("2025-13-40 25:61"), None);
    }

    #[test]
    fn test_unrecoverable_values() {
        assert_eq!(normalize_arrival_date(""), None);
        assert_eq!(normalize_arrival_date("Not available"), None);
        assert_eq!(normalize_arrival_date("2025-03-28"), None);
        assert_eq!(normalize_arrival_date("TBD"), None);
    }
}
