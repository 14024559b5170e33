//! Calendar dates in the fixed `YYYY-MM-DD` storage format
//!
//! Dates cross the storage and presentation boundaries as text. Parsing here is
//! strict: exactly ten characters, zero-padded, no time component.

use chrono::{Months, NaiveDate};
use thiserror::Error;

/// chrono format string for the storage format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of a complete date in the storage format
pub const DATE_LEN: usize = 10;

/// A date string that is not a valid `YYYY-MM-DD` calendar date
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a valid date (expected YYYY-MM-DD)")]
pub struct DateParseError {
    pub input: String,
}

/// Parse a complete date. Rejects unpadded fields like `2024-1-5`.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateParseError> {
    let err = || DateParseError {
        input: text.to_string(),
    };

    let bytes = text.as_bytes();
    if bytes.len() != DATE_LEN {
        return Err(err());
    }
    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return Err(err());
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| err())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Read-side parsing: malformed or missing values become unset
pub fn parse_stored_date(column: &str, value: Option<String>) -> Option<NaiveDate> {
    let value = value?;
    match parse_date(&value) {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::warn!(column, value = %value, "unparseable stored date treated as unset");
            None
        }
    }
}

/// Same day one calendar year later. Feb 29 clamps to Feb 28.
pub fn add_one_year(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(12))
}

/// Keystroke admission for a date entry field.
///
/// `text` is the field content after the keystroke, `last` the typed character
/// (`'\0'` when the text was set programmatically). Digits and `-` pass while the
/// text is shorter than a full date; a full-length text must be a valid date.
pub fn accept_date_keystroke(text: &str, last: char) -> bool {
    if !(last.is_ascii_digit() || last == '-' || last == '\0') {
        return false;
    }

    let len = text.chars().count();
    if len < DATE_LEN {
        true
    } else if len == DATE_LEN {
        parse_date(text).is_ok()
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_valid() {
        assert_eq!(parse_date("2023-06-15").unwrap(), date(2023, 6, 15));
        assert_eq!(parse_date("2024-02-29").unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("").is_err());
        assert!(parse_date("2023-6-15").is_err());
        assert!(parse_date("2023-06-5 ").is_err());
        assert!(parse_date("2023/06/15").is_err());
        assert!(parse_date("2023-13-01").is_err());
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("2023-06-15T00:00:00").is_err());
        assert!(parse_date("15-06-2023").is_err());
    }

    #[test]
    fn test_parse_error_mentions_input() {
        let err = parse_date("garbage").unwrap_err();
        assert!(err.to_string().contains("garbage"));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2023, 1, 5)), "2023-01-05");
    }

    #[test]
    fn test_parse_stored_date_degrades() {
        assert_eq!(
            parse_stored_date("purchase_date", Some("2023-06-15".to_string())),
            Some(date(2023, 6, 15))
        );
        assert_eq!(
            parse_stored_date("purchase_date", Some("15/06/2023".to_string())),
            None
        );
        assert_eq!(parse_stored_date("warranty_end_date", None), None);
    }

    #[test]
    fn test_add_one_year() {
        assert_eq!(add_one_year(date(2023, 6, 15)), Some(date(2024, 6, 15)));
        assert_eq!(add_one_year(date(2023, 12, 31)), Some(date(2024, 12, 31)));
    }

    #[test]
    fn test_add_one_year_leap_day_clamps() {
        assert_eq!(add_one_year(date(2024, 2, 29)), Some(date(2025, 2, 28)));
    }

    #[test]
    fn test_keystroke_accepts_partial_input() {
        let full = "2024-02-29";
        for end in 1..DATE_LEN {
            let partial = &full[..end];
            let last = partial.chars().last().unwrap();
            assert!(accept_date_keystroke(partial, last), "rejected {partial}");
        }
        // Partial input is not validated beyond the character class
        assert!(accept_date_keystroke("9999-99", '9'));
        assert!(accept_date_keystroke("--", '-'));
    }

    #[test]
    fn test_keystroke_full_length_must_parse() {
        for s in ["2024-02-29", "2023-06-15", "1999-12-31"] {
            assert!(accept_date_keystroke(s, s.chars().last().unwrap()));
        }
        for s in ["2023-02-29", "2023-13-01", "2023-00-10", "2023--0615"] {
            assert!(!accept_date_keystroke(s, s.chars().last().unwrap()), "accepted {s}");
        }
    }

    #[test]
    fn test_keystroke_full_length_agrees_with_parse() {
        let samples = [
            "2024-02-29", "2023-02-29", "2000-02-29", "1900-02-29", "2023-04-31",
            "2023-04-30", "0000-01-01", "2023-1-015",
        ];
        for s in samples {
            let last = s.chars().last().unwrap();
            assert_eq!(accept_date_keystroke(s, last), parse_date(s).is_ok(), "{s}");
        }
    }

    #[test]
    fn test_keystroke_rejects_other_characters() {
        assert!(!accept_date_keystroke("2023a", 'a'));
        assert!(!accept_date_keystroke("2023/", '/'));
        assert!(!accept_date_keystroke(" ", ' '));
    }

    #[test]
    fn test_keystroke_rejects_overlong() {
        assert!(!accept_date_keystroke("2023-06-151", '1'));
    }

    #[test]
    fn test_keystroke_programmatic_set() {
        assert!(accept_date_keystroke("", '\0'));
        assert!(accept_date_keystroke("2023-06-15", '\0'));
        assert!(!accept_date_keystroke("2023-06-32", '\0'));
    }
}
