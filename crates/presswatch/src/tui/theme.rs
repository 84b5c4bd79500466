//! Color palette for the TUI.

use presswatch_timeline::MediaType;
use ratatui::style::Color;

/// Accent color for headers and selection.
pub const ACCENT: Color = Color::Cyan;

/// Dimmed color for hints and secondary text.
pub const DIM: Color = Color::DarkGray;

/// Color for error messages.
pub const ERROR: Color = Color::Red;

/// Colors assigned to parties, cycled by a stable hash.
const PARTY_PALETTE: [Color; 6] = [
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Blue,
    Color::LightRed,
    Color::LightCyan,
];

/// Stable color for a party name; the same name always gets the same
/// color within and across runs.
pub fn party_color(party: Option<&str>) -> Color {
    match party {
        None => Color::Gray,
        Some(name) => {
            let hash: usize = name
                .to_lowercase()
                .bytes()
                .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
            PARTY_PALETTE[hash % PARTY_PALETTE.len()]
        }
    }
}

/// Color keyed by the media type of an item.
pub fn media_color(media: MediaType) -> Color {
    match media {
        MediaType::Twitter => Color::LightBlue,
        MediaType::Youtube => Color::LightRed,
        MediaType::Facebook => Color::Blue,
        MediaType::Instagram => Color::Magenta,
        MediaType::News => Color::Green,
        MediaType::Unknown => Color::Gray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_color_is_stable() {
        assert_eq!(party_color(Some("Unity")), party_color(Some("Unity")));
        assert_eq!(party_color(Some("Unity")), party_color(Some("unity")));
    }

    #[test]
    fn test_no_party_gets_neutral_color() {
        assert_eq!(party_color(None), Color::Gray);
    }
}
