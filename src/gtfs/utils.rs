use std::fmt::Display;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use super::structure::serde_helpers::GTFS_DATE_FORMAT;

lazy_static! {
    // ASCII only, `\d` would also match other scripts' digits
    static ref DIGITS: Regex = Regex::new("[0-9]+").unwrap();
}

#[derive(thiserror::Error, Debug)]
pub struct DateError(String);

impl Display for DateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DateError: {}", self.0)
    }
}

pub type DateResult<T> = Result<T, DateError>;

pub fn parse_date(date: &str) -> DateResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), GTFS_DATE_FORMAT)
        .map_err(|e| DateError(format!("{:?}: {}", date, e)))
}

/// First maximal run of decimal digits, e.g. `"1-350"` gives `"1"`
pub fn first_digit_run(s: &str) -> Option<&str> {
    DIGITS.find(s).map(|m| m.as_str())
}

/// Non-empty and made only of ASCII digits
pub fn is_digits_only(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_first_digit_run() {
        assert_eq!(first_digit_run("1-350"), Some("1"));
        assert_eq!(first_digit_run("WA1234"), Some("1234"));
        assert_eq!(first_digit_run("place007ab12"), Some("007"));
        assert_eq!(first_digit_run("RZ"), None);
        assert_eq!(first_digit_run("٣٤"), None);
    }

    #[test]
    fn test_is_digits_only() {
        assert!(is_digits_only("3037"));
        assert!(!is_digits_only(""));
        assert!(!is_digits_only("30 37"));
        assert!(!is_digits_only("CD995"));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("20240205").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 5).unwrap()
        );
        assert!(parse_date("2024-02-05").is_err());
    }
}
