//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use chrono::NaiveDate;
use console::{style, StyledObject};
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::date::format_date;
use crate::core::Database;
use crate::entities::{AssetCategory, Location, Tone};

/// Open (and on first use, create) the configured database
pub fn open_database(global: &GlobalOpts) -> Result<Database> {
    let path = global.database_path();
    let db = Database::open(&path)?;
    Ok(db)
}

/// Look up a category by numeric id or code prefix (case-insensitive)
pub fn resolve_category(db: &Database, key: &str) -> Result<AssetCategory> {
    let key = key.trim().trim_end_matches('-');
    let found = match key.parse::<i64>() {
        Ok(id) => db.categories().get(id)?,
        Err(_) => db.categories().find_by_prefix(key)?,
    };
    found.ok_or_else(|| {
        miette::miette!(
            help = "Use `itrack category list` to see categories",
            "No category matching '{}'",
            key
        )
    })
}

/// Look up a location by numeric id or name (case-insensitive)
pub fn resolve_location(db: &Database, key: &str) -> Result<Location> {
    let key = key.trim();
    let found = match key.parse::<i64>() {
        Ok(id) => db.locations().get(id)?,
        Err(_) => db
            .locations()
            .list()?
            .into_iter()
            .find(|l| l.name.eq_ignore_ascii_case(key)),
    };
    found.ok_or_else(|| {
        miette::miette!(
            help = "Use `itrack location list` to see locations",
            "No location matching '{}'",
            key
        )
    })
}

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a string ID for display, truncating if too long
pub fn format_short_id_str(id: &str) -> String {
    if id.chars().count() > 16 {
        let kept: String = id.chars().take(13).collect();
        format!("{}...", kept)
    } else {
        id.to_string()
    }
}

/// Colour a status label by its tone
pub fn style_tone<D>(text: D, tone: Tone) -> StyledObject<D> {
    match tone {
        Tone::Info => style(text).cyan(),
        Tone::Success => style(text).green(),
        Tone::Warning => style(text).yellow(),
        Tone::Danger => style(text).red(),
        Tone::Neutral => style(text).dim(),
    }
}

/// `YYYY-MM-DD`, or "-" when unset
pub fn display_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_short_id_str() {
        assert_eq!(format_short_id_str("SHORT"), "SHORT");
        assert_eq!(
            format_short_id_str("01J8ZQ4V3K2M7N9P0R5S6T7U8W"),
            "01J8ZQ4V3K2M7..."
        );
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("Büroetage Süd", 8), "Büroe...");
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date(NaiveDate::from_ymd_opt(2024, 1, 31)), "2024-01-31");
        assert_eq!(display_date(None), "-");
    }
}
