//! Card content formatting.
//!
//! A media event is composed once into [`CardContent`] and rendered two
//! ways: an HTML blob for the exported timeline page and a plain-text
//! rendition for the terminal detail pane. Both go through the same
//! degradation tiers, so a partially filled row still yields a readable
//! card and a fully empty one yields a distinct incomplete variant instead
//! of an empty shell.
//!
//! Everything interpolated into the HTML rendition is escaped. Sheet cells
//! are untrusted input; this is a security contract, not a style choice.

use chrono::NaiveDate;
use presswatch_models::MediaEvent;
use url::Url;

use crate::media::{detect_media_type, MediaType};

/// Maximum description length in characters before truncation.
pub const DESCRIPTION_LIMIT: usize = 200;

/// Text shown when an event has a headline but no description.
const NO_DESCRIPTION: &str = "No description available.";

/// Text marking the incomplete card variant.
const INCOMPLETE_MARKER: &str = "Incomplete media entry";

/// Card variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    /// At least one of headline/description/link carries content.
    Normal,
    /// Nothing usable beyond the date; rendered as a distinct variant.
    Incomplete,
}

/// A media event reduced to renderable card fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardContent {
    /// Variant marker.
    pub kind: CardKind,
    /// Headline, real or synthesized from the link domain.
    pub headline: Option<String>,
    /// The parsed announcement date.
    pub date: NaiveDate,
    /// Description, already truncated.
    pub description: Option<String>,
    /// Classified media source.
    pub media: MediaType,
    /// Party attribution.
    pub party: Option<String>,
    /// Source link, when present.
    pub link: Option<String>,
}

/// Composes the renderable card fields for an event.
pub fn compose_card(event: &MediaEvent, date: NaiveDate) -> CardContent {
    let media = detect_media_type(event.news_link.as_deref().unwrap_or(""));
    let link = event.news_link.clone();

    let headline = event.headline.clone().or_else(|| {
        link.as_deref().map(|l| {
            format!(
                "Media from {}",
                link_domain(l).unwrap_or_else(|| "unknown source".to_string())
            )
        })
    });

    let description = event
        .description
        .as_deref()
        .map(|d| truncate_text(d, DESCRIPTION_LIMIT));

    let kind = if headline.is_none() && description.is_none() && link.is_none() {
        CardKind::Incomplete
    } else {
        CardKind::Normal
    };

    CardContent {
        kind,
        headline,
        date,
        description,
        media,
        party: event.party.clone(),
        link,
    }
}

/// Formats an event straight into the HTML content blob.
pub fn format_card(event: &MediaEvent, date: NaiveDate) -> String {
    render_html(&compose_card(event, date))
}

/// Renders the card as a self-contained HTML fragment.
pub fn render_html(card: &CardContent) -> String {
    let date = card.date.format("%-d %b %Y");

    if card.kind == CardKind::Incomplete {
        let mut html = format!(
            "<div class=\"card card--incomplete\">\
             <span class=\"card__date\">{date}</span>"
        );
        if let Some(party) = &card.party {
            html.push_str(&format!(
                "<span class=\"card__party\">{}</span>",
                escape_html(party)
            ));
        }
        html.push_str(&format!(
            "<p class=\"card__missing\">{INCOMPLETE_MARKER}</p></div>"
        ));
        return html;
    }

    let mut html = format!(
        "<div class=\"card {}\"><span class=\"card__media\">{}</span>\
         <span class=\"card__date\">{date}</span>",
        card.media.css_class(),
        card.media.label(),
    );

    if let Some(party) = &card.party {
        html.push_str(&format!(
            "<span class=\"card__party\">{}</span>",
            escape_html(party)
        ));
    }

    if let Some(headline) = &card.headline {
        html.push_str(&format!(
            "<h3 class=\"card__headline\">{}</h3>",
            escape_html(headline)
        ));
    }

    match &card.description {
        Some(description) => html.push_str(&format!(
            "<p class=\"card__desc\">{}</p>",
            escape_html(description)
        )),
        None if card.headline.is_some() => html.push_str(&format!(
            "<p class=\"card__desc card__desc--missing\">{NO_DESCRIPTION}</p>"
        )),
        None => {}
    }

    if let Some(link) = &card.link {
        html.push_str(&format!(
            "<a class=\"card__link\" href=\"{}\" target=\"_blank\" \
             rel=\"noopener noreferrer\">Read coverage</a>",
            escape_html(link)
        ));
    }

    html.push_str("</div>");
    html
}

/// Renders the card as plain text for the terminal detail pane.
pub fn render_text(card: &CardContent) -> String {
    let date = card.date.format("%-d %b %Y");

    let mut header = format!("[{}] {date}", card.media.label());
    if let Some(party) = &card.party {
        header.push_str(&format!(" · {party}"));
    }

    if card.kind == CardKind::Incomplete {
        return format!("{header}\n{INCOMPLETE_MARKER}");
    }

    let mut lines = vec![header];
    if let Some(headline) = &card.headline {
        lines.push(headline.clone());
    }
    match &card.description {
        Some(description) => lines.push(description.clone()),
        None if card.headline.is_some() => lines.push(NO_DESCRIPTION.to_string()),
        None => {}
    }
    if let Some(link) = &card.link {
        lines.push(format!("→ {link}"));
    }

    lines.join("\n")
}

/// Escapes text for interpolation into HTML, attribute positions included.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Truncates at a sentence boundary when one exists inside the limit,
/// otherwise at a word boundary. Never cuts mid-word and never splits a
/// multi-byte character.
fn truncate_text(text: &str, limit: usize) -> String {
    let mut indices = text.char_indices();
    let Some((cut, _)) = indices.nth(limit) else {
        return text.to_string();
    };
    let window = &text[..cut];

    if let Some(pos) = window.rfind(['.', '!', '?']) {
        let kept = window[..pos + 1].trim_end();
        if !kept.is_empty() {
            return kept.to_string();
        }
    }

    if let Some(pos) = window.rfind(char::is_whitespace) {
        let kept = window[..pos].trim_end();
        if !kept.is_empty() {
            return format!("{kept}…");
        }
    }

    format!("{window}…")
}

/// Host of the link with any leading `www.` removed.
fn link_domain(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    let host = url.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}
