//! Batch mapping from media events to timeline items.

use chrono::NaiveDate;
use presswatch_models::MediaEvent;
use serde::Serialize;
use tracing::debug;

use crate::card::{compose_card, render_html, render_text, CardKind};
use crate::date::parse_announced_date;
use crate::error::DateError;
use crate::media::MediaType;

/// Maximum length of the short item title.
const TITLE_LIMIT: usize = 60;

/// Item kind accepted by the timeline widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Card-style box anchored to a date.
    Box,
}

/// One renderable, date-anchored timeline unit.
///
/// Serializes to the item shape the timeline widget consumes (`id`,
/// `start`, `content`, optional `className`, `type`); the plain-text
/// rendition and media tag are terminal-only and skipped.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineItem {
    /// Synthetic id, unique within the current render.
    pub id: usize,

    /// Calendar date derived from `date_announced`.
    pub start: NaiveDate,

    /// Fully formed HTML card string.
    pub content: String,

    /// Short display label.
    pub title: String,

    /// Party attribution carried through for grouping/styling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,

    /// Styling classes (media source, party slug).
    #[serde(rename = "className", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// Fixed to the box/card kind.
    #[serde(rename = "type")]
    pub kind: ItemKind,

    /// Plain-text card for the terminal detail pane.
    #[serde(skip_serializing)]
    pub text: String,

    /// Classified media source, for terminal colour coding.
    #[serde(skip_serializing)]
    pub media: MediaType,
}

/// A row dropped during mapping, with its input position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Zero-based index of the row in the input batch.
    pub index: usize,
    /// Why the row could not be placed on the timeline.
    pub reason: DateError,
}

/// The mapped batch: items in input order plus an observable skip record.
#[derive(Debug, Clone, Default)]
pub struct MappedBatch {
    /// One item per renderable row, input order preserved.
    pub items: Vec<TimelineItem>,
    /// Rows dropped because their date could not be parsed.
    pub skipped: Vec<SkippedRow>,
}

impl MappedBatch {
    /// True when no row survived mapping. A valid outcome, not an error.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Maps a batch of media events into timeline items.
///
/// Rows whose date cannot be parsed are skipped and recorded; the batch
/// never fails as a whole. Duplicate dates are allowed and stack.
pub fn map_to_timeline_items(events: &[MediaEvent]) -> MappedBatch {
    let mut batch = MappedBatch::default();

    for (index, event) in events.iter().enumerate() {
        let start = match parse_announced_date(&event.date_announced) {
            Ok(date) => date,
            Err(reason) => {
                debug!(index, %reason, "row dropped");
                batch.skipped.push(SkippedRow { index, reason });
                continue;
            }
        };

        let card = compose_card(event, start);
        let title = item_title(&card);
        let class_name = Some(match &card.party {
            Some(party) => format!("{} party-{}", card.media.css_class(), party_slug(party)),
            None => card.media.css_class().to_string(),
        });

        batch.items.push(TimelineItem {
            id: batch.items.len() + 1,
            start,
            content: render_html(&card),
            title,
            party: card.party.clone(),
            class_name,
            kind: ItemKind::Box,
            text: render_text(&card),
            media: card.media,
        });
    }

    batch
}

/// Short label for the item: headline, else description lead, else the
/// incomplete marker.
fn item_title(card: &crate::card::CardContent) -> String {
    if card.kind == CardKind::Incomplete {
        return "Incomplete entry".to_string();
    }

    let source = card
        .headline
        .as_deref()
        .or(card.description.as_deref())
        .unwrap_or("Media coverage");

    let mut title: String = source.chars().take(TITLE_LIMIT).collect();
    if source.chars().count() > TITLE_LIMIT {
        title.push('…');
    }
    title
}

/// Lowercase alphanumeric slug for CSS class names.
fn party_slug(party: &str) -> String {
    let mut slug = String::with_capacity(party.len());
    let mut last_dash = true;
    for c in party.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(date: &str, headline: &str) -> MediaEvent {
        MediaEvent {
            date_announced: date.to_string(),
            news_link: Some("https://example-news.com/a".to_string()),
            headline: Some(headline.to_string()),
            description: None,
            party: Some("Unity Party".to_string()),
        }
    }

    #[test]
    fn test_bad_row_skipped_order_preserved() {
        let events = vec![
            event("01/01/2020", "one"),
            event("02/01/2020", "two"),
            event("not a date", "three"),
            event("04/01/2020", "four"),
            event("05/01/2020", "five"),
        ];

        let batch = map_to_timeline_items(&events);

        assert_eq!(batch.items.len(), 4);
        let titles: Vec<&str> = batch.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "two", "four", "five"]);

        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].index, 2);
        assert!(matches!(batch.skipped[0].reason, DateError::Unrecognized(_)));
    }

    #[test]
    fn test_ids_unique_within_render() {
        let events = vec![event("01/01/2020", "a"), event("01/01/2020", "b")];
        let batch = map_to_timeline_items(&events);

        assert_eq!(batch.items[0].id, 1);
        assert_eq!(batch.items[1].id, 2);
    }

    #[test]
    fn test_duplicate_dates_stack() {
        let events = vec![event("01/01/2020", "a"), event("01/01/2020", "b")];
        let batch = map_to_timeline_items(&events);

        assert_eq!(batch.items.len(), 2);
        assert_eq!(batch.items[0].start, batch.items[1].start);
    }

    #[test]
    fn test_fully_empty_batch_is_valid() {
        let events = vec![event("nope", "a"), event("", "b")];
        let batch = map_to_timeline_items(&events);

        assert!(batch.is_empty());
        assert_eq!(batch.skipped.len(), 2);
        assert_eq!(batch.skipped[1].reason, DateError::Empty);
    }

    #[test]
    fn test_empty_input() {
        let batch = map_to_timeline_items(&[]);
        assert!(batch.is_empty());
        assert!(batch.skipped.is_empty());
    }

    #[test]
    fn test_item_carries_party_and_classes() {
        let batch = map_to_timeline_items(&[event("15/02/2020", "a")]);
        let item = &batch.items[0];

        assert_eq!(item.party.as_deref(), Some("Unity Party"));
        assert_eq!(item.class_name.as_deref(), Some("media-news party-unity-party"));
        assert_eq!(item.kind, ItemKind::Box);
        assert_eq!(item.media, MediaType::News);
    }

    #[test]
    fn test_serialized_item_shape() {
        let batch = map_to_timeline_items(&[event("15/02/2020", "a")]);
        let json = serde_json::to_value(&batch.items[0]).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["start"], "2020-02-15");
        assert_eq!(json["type"], "box");
        assert!(json["content"].as_str().unwrap().contains("card"));
        assert!(json.get("text").is_none());
        assert!(json.get("media").is_none());
        assert_eq!(json["className"], "media-news party-unity-party");
    }

    #[test]
    fn test_party_slug() {
        assert_eq!(party_slug("Unity Party"), "unity-party");
        assert_eq!(party_slug("  A&B  "), "a-b");
        assert_eq!(party_slug("---"), "");
    }
}
