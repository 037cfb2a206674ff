//! Splitting a combined "VESSEL NAME 0096W" string into name and voyage

use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing 4-5 digit voyage code with a compass suffix, as printed in result tables
static TABLE_VOYAGE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.*\S)\s+(\d{4,5}[WENS])$").unwrap());

/// Whether a token looks like a voyage number
///
/// The token must contain a digit and end in one of the compass letters
/// `W`, `E`, `N`, `S` (any case).
///
/// # Examples
///
/// ```
/// use seatrack_extractor::is_voyage_token;
///
/// assert!(is_voyage_token("0096W"));
/// assert!(is_voyage_token("12e"));
/// assert!(!is_voyage_token("MANDATE"));
/// assert!(!is_voyage_token("0096"));
/// ```
pub fn is_voyage_token(token: &str) -> bool {
    let has_digit = token.chars().any(|c| c.is_ascii_digit());
    let compass_suffix = matches!(
        token.chars().last().map(|c| c.to_ascii_uppercase()),
        Some('W' | 'E' | 'N' | 'S')
    );
    has_digit && compass_suffix
}

/// Split a combined vessel/voyage string on its last whitespace boundary
///
/// The trailing token becomes the voyage number only when
/// [`is_voyage_token`] accepts it; otherwise the whole string is the vessel
/// name and no voyage number is recovered.
///
/// # Examples
///
/// ```
/// use seatrack_extractor::split_combined;
///
/// assert_eq!(
///     split_combined("YM MANDATE 0096W"),
///     ("YM MANDATE".to_string(), Some("0096W".to_string()))
/// );
/// assert_eq!(split_combined("YM MANDATE"), ("YM MANDATE".to_string(), None));
/// ```
pub fn split_combined(value: &str) -> (String, Option<String>) {
    let trimmed = value.trim();
    match trimmed.rsplit_once(char::is_whitespace) {
        Some((name, token)) if is_voyage_token(token) && !name.trim().is_empty() => {
            (name.trim_end().to_string(), Some(token.to_string()))
        }
        _ => (trimmed.to_string(), None),
    }
}

/// Split the first column of a result table row
///
/// Stricter than [`split_combined`]: the voyage token must be exactly 4-5
/// digits followed by a compass letter.
pub(crate) fn split_table_vessel(cell: &str) -> (String, Option<String>) {
    let trimmed = cell.trim();
    match TABLE_VOYAGE_SUFFIX.captures(trimmed) {
        Some(caps) => (caps[1].to_string(), Some(caps[2].to_string())),
        None => (trimmed.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_combined_with_voyage() {
        let (name, voyage) = split_combined("YM MANDATE 0096W");
        assert_eq!(name, "YM MANDATE");
        assert_eq!(voyage.as_deref(), Some("0096W"));
    }

    #[test]
    fn test_split_combined_without_voyage() {
        let (name, voyage) = split_combined("YM MANDATE");
        assert_eq!(name, "YM MANDATE");
        assert!(voyage.is_none());
    }

    #[test]
    fn test_trailing_number_without_compass_stays_in_name() {
        let (name, voyage) = split_combined("EVER GIVEN 2");
        assert_eq!(name, "EVER GIVEN 2");
        assert!(voyage.is_none());
    }

    #[test]
    fn test_single_token_is_vessel_name() {
        let (name, voyage) = split_combined("0096W");
        assert_eq!(name, "0096W");
        assert!(voyage.is_none());
    }

    #[test]
    fn test_lowercase_compass_and_extra_whitespace() {
        let (name, voyage) = split_combined("  HMM  ALGECIRAS   012e ");
        assert_eq!(name, "HMM  ALGECIRAS");
        assert_eq!(voyage.as_deref(), Some("012e"));
    }

    #[test]
    fn test_word_ending_in_compass_letter_is_not_voyage() {
        // "SEAS" ends in S but has no digit
        let (name, voyage) = split_combined("SEVEN SEAS");
        assert_eq!(name, "SEVEN SEAS");
        assert!(voyage.is_none());
    }

    #[test]
    fn test_split_table_vessel() {
        assert_eq!(
            split_table_vessel(" YM MANDATE 0096W "),
            ("YM MANDATE".to_string(), Some("0096W".to_string()))
        );
        assert_eq!(
            split_table_vessel("HYUNDAI DREAM 001234E"),
            ("HYUNDAI DREAM 001234E".to_string(), None)
        );
        assert_eq!(
            split_table_vessel("YM MANDATE"),
            ("YM MANDATE".to_string(), None)
        );
    }
}
