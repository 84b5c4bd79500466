//! Announcement-date normalization.
//!
//! Sheets hand dates back as display text. The primary expected shape is
//! day/month/year; month/day/year, year-month-day and a few textual forms
//! are accepted as fallbacks, in that order. Calendar validation is strict:
//! `chrono::NaiveDate::from_ymd_opt` rejects day 31 of a 30-day month
//! instead of rolling it into the next month.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::DateError;

/// Textual fallback formats tried after the numeric shapes.
const TEXT_FORMATS: [&str; 3] = ["%d %B %Y", "%B %d, %Y", "%d %b %Y"];

/// Parses raw sheet text into a calendar date.
///
/// Never panics; failure means the caller drops the row.
pub fn parse_announced_date(text: &str) -> Result<NaiveDate, DateError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DateError::Empty);
    }

    static DMY_RE: OnceLock<Regex> = OnceLock::new();
    static YMD_RE: OnceLock<Regex> = OnceLock::new();

    let dmy = DMY_RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})[/\-.](\d{1,2})[/\-.](\d{4})$").expect("valid regex")
    });
    let ymd = YMD_RE.get_or_init(|| {
        Regex::new(r"^(\d{4})[/\-.](\d{1,2})[/\-.](\d{1,2})$").expect("valid regex")
    });

    if let Some(caps) = dmy.captures(trimmed) {
        let (a, b, year) = (num(&caps[1]), num(&caps[2]), caps[3].parse::<i32>());
        if let (Some(a), Some(b), Ok(year)) = (a, b, year) {
            // day/month first, then month/day.
            if let Some(date) = NaiveDate::from_ymd_opt(year, b, a) {
                return Ok(date);
            }
            if let Some(date) = NaiveDate::from_ymd_opt(year, a, b) {
                return Ok(date);
            }
        }
        return Err(DateError::Unrecognized(trimmed.to_string()));
    }

    if let Some(caps) = ymd.captures(trimmed) {
        let (year, month, day) = (caps[1].parse::<i32>(), num(&caps[2]), num(&caps[3]));
        if let (Ok(year), Some(month), Some(day)) = (year, month, day) {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Ok(date);
            }
        }
        return Err(DateError::Unrecognized(trimmed.to_string()));
    }

    for format in TEXT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    Err(DateError::Unrecognized(trimmed.to_string()))
}

fn num(s: &str) -> Option<u32> {
    s.parse().ok()
}
