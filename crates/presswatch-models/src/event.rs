//! Media event records from the per-project sheets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Column name for the announcement date (the chronological anchor).
pub const COL_DATE_ANNOUNCED: &str = "date_announced";

/// Column name for the coverage URL.
pub const COL_NEWS_LINK: &str = "news_link";

/// Column name for the headline.
pub const COL_HEADLINE: &str = "headline";

/// Column name for the description.
pub const COL_DESCRIPTION: &str = "description";

/// Column name for the political-party attribution.
pub const COL_PARTY: &str = "party";

/// One news or social-media mention of a project.
///
/// Only the announcement date is load-bearing: an event whose date cannot
/// be parsed is dropped from the rendered set. Every other field may be
/// absent and is absorbed by the card formatter's fallback tiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEvent {
    /// Raw day/month/year text from the sheet.
    pub date_announced: String,

    /// Coverage URL; may be absent or malformed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_link: Option<String>,

    /// Headline; may be absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,

    /// Description; may be absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Political-party attribution; may be absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
}

impl MediaEvent {
    /// Columns a per-project sheet must carry.
    pub const REQUIRED_COLUMNS: [&'static str; 5] = [
        COL_DATE_ANNOUNCED,
        COL_NEWS_LINK,
        COL_HEADLINE,
        COL_DESCRIPTION,
        COL_PARTY,
    ];

    /// Builds an event from a project-sheet row.
    ///
    /// Total: blank optional fields become `None`, a blank date becomes an
    /// empty string that the date normaliser will reject later.
    pub fn from_row(row: &HashMap<String, String>) -> Self {
        Self {
            date_announced: row
                .get(COL_DATE_ANNOUNCED)
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            news_link: non_blank(row.get(COL_NEWS_LINK)),
            headline: non_blank(row.get(COL_HEADLINE)),
            description: non_blank(row.get(COL_DESCRIPTION)),
            party: non_blank(row.get(COL_PARTY)),
        }
    }
}

/// Trims the value and drops it when empty.
fn non_blank(value: Option<&String>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_row_complete() {
        let event = MediaEvent::from_row(&row(&[
            (COL_DATE_ANNOUNCED, "15/02/2020"),
            (COL_NEWS_LINK, "https://example-news.com/a"),
            (COL_HEADLINE, "Work begins"),
            (COL_DESCRIPTION, "Ground broken on the new line."),
            (COL_PARTY, "Unity Party"),
        ]));

        assert_eq!(event.date_announced, "15/02/2020");
        assert_eq!(event.news_link.as_deref(), Some("https://example-news.com/a"));
        assert_eq!(event.headline.as_deref(), Some("Work begins"));
        assert_eq!(event.party.as_deref(), Some("Unity Party"));
    }

    #[test]
    fn test_from_row_blank_optionals_become_none() {
        let event = MediaEvent::from_row(&row(&[
            (COL_DATE_ANNOUNCED, "1/1/2021"),
            (COL_NEWS_LINK, ""),
            (COL_HEADLINE, "  "),
            (COL_DESCRIPTION, ""),
            (COL_PARTY, ""),
        ]));

        assert!(event.news_link.is_none());
        assert!(event.headline.is_none());
        assert!(event.description.is_none());
        assert!(event.party.is_none());
    }

    #[test]
    fn test_from_row_missing_keys() {
        let event = MediaEvent::from_row(&row(&[]));

        assert_eq!(event.date_announced, "");
        assert!(event.news_link.is_none());
        assert!(event.headline.is_none());
    }
}
