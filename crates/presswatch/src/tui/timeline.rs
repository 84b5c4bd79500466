//! Timeline widget.
//!
//! Renders the mapped items as date-anchored markers over a horizontal
//! time axis. Columns map linearly to days; `days_per_column` is the zoom
//! level and `scroll_offset` pans in whole days. Items on the same date
//! stack vertically.

use std::collections::HashMap;

use chrono::NaiveDate;
use presswatch_timeline::TimelineItem;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use super::theme;

/// Marker drawn for an item.
const MARKER: &str = "◆";
/// Marker drawn for the selected item.
const MARKER_SELECTED: &str = "◉";
/// Overflow indicator when a column's stack exceeds the view height.
const OVERFLOW: &str = "┊";

/// Rows reserved at the bottom for the axis line and its labels.
const AXIS_ROWS: u16 = 2;
/// Column spacing between axis labels.
const LABEL_STEP: u16 = 14;

/// Finest zoom level (hours per column, roughly).
const MIN_DAYS_PER_COLUMN: f64 = 0.25;
/// Coarsest zoom level.
const MAX_DAYS_PER_COLUMN: f64 = 90.0;

/// View state of the timeline: pan, zoom and selection.
#[derive(Debug, Clone)]
pub struct TimelineState {
    /// Pan offset in days from the first item's date.
    pub scroll_offset: i64,
    /// Zoom level; one terminal column covers this many days.
    pub days_per_column: f64,
    /// Selected item index, if any.
    pub selected: Option<usize>,
}

impl Default for TimelineState {
    fn default() -> Self {
        Self {
            scroll_offset: 0,
            days_per_column: 7.0,
            selected: None,
        }
    }
}

impl TimelineState {
    /// Resets pan and zoom so the whole batch fits in `width` columns,
    /// and selects the first item.
    pub fn fit(&mut self, items: &[TimelineItem], width: u16) {
        self.scroll_offset = 0;
        self.selected = if items.is_empty() { None } else { Some(0) };

        let Some((first, last)) = date_range(items) else {
            self.days_per_column = 7.0;
            return;
        };

        let span_days = (last - first).num_days().max(1) as f64;
        let usable = width.saturating_sub(4).max(1) as f64;
        self.days_per_column = (span_days / usable).clamp(MIN_DAYS_PER_COLUMN, MAX_DAYS_PER_COLUMN);
    }

    /// Zooms in (fewer days per column).
    pub fn zoom_in(&mut self) {
        self.days_per_column = (self.days_per_column / 2.0).max(MIN_DAYS_PER_COLUMN);
    }

    /// Zooms out (more days per column).
    pub fn zoom_out(&mut self) {
        self.days_per_column = (self.days_per_column * 2.0).min(MAX_DAYS_PER_COLUMN);
    }

    /// Pans left by a few columns' worth of days.
    pub fn scroll_left(&mut self) {
        self.scroll_offset -= self.scroll_step();
    }

    /// Pans right.
    pub fn scroll_right(&mut self) {
        self.scroll_offset += self.scroll_step();
    }

    fn scroll_step(&self) -> i64 {
        (self.days_per_column * 4.0).ceil() as i64
    }

    /// Moves the selection to the next item, wrapping at the end.
    pub fn select_next(&mut self, total: usize) {
        if total == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < total => i + 1,
            _ => 0,
        });
    }

    /// Moves the selection to the previous item, wrapping at the start.
    pub fn select_prev(&mut self, total: usize) {
        if total == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i > 0 => i - 1,
            _ => total - 1,
        });
    }
}

/// Column for a date, or None when it falls outside the view.
fn column_for(date: NaiveDate, origin: NaiveDate, state: &TimelineState, width: u16) -> Option<u16> {
    let days = (date - origin).num_days() - state.scroll_offset;
    let column = (days as f64 / state.days_per_column).floor() as i64;
    if (0..width as i64).contains(&column) {
        Some(column as u16)
    } else {
        None
    }
}

/// First and last item dates.
fn date_range(items: &[TimelineItem]) -> Option<(NaiveDate, NaiveDate)> {
    let first = items.iter().map(|i| i.start).min()?;
    let last = items.iter().map(|i| i.start).max()?;
    Some((first, last))
}

/// The timeline rendered over a time axis.
pub struct TimelineWidget<'a> {
    items: &'a [TimelineItem],
    state: &'a TimelineState,
}

impl<'a> TimelineWidget<'a> {
    pub fn new(items: &'a [TimelineItem], state: &'a TimelineState) -> Self {
        Self { items, state }
    }
}

impl Widget for TimelineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height <= AXIS_ROWS || self.items.is_empty() {
            return;
        }

        let Some((origin, _)) = date_range(self.items) else {
            return;
        };

        let axis_y = area.y + area.height - AXIS_ROWS;
        let label_y = axis_y + 1;
        let marker_rows = area.height - AXIS_ROWS;

        // Axis baseline.
        for x in area.x..area.x + area.width {
            buf[(x, axis_y)].set_symbol("─").set_style(Style::default().fg(theme::DIM));
        }

        // Date labels under the axis, one per label step.
        let mut column = 0u16;
        while column < area.width {
            let days = self.state.scroll_offset
                + (column as f64 * self.state.days_per_column).round() as i64;
            if let Some(date) = origin.checked_add_signed(chrono::Duration::days(days)) {
                let label = date.format("%d %b %y").to_string();
                if column + label.len() as u16 <= area.width {
                    buf[(area.x + column, axis_y)].set_symbol("┬");
                    buf.set_string(
                        area.x + column,
                        label_y,
                        label,
                        Style::default().fg(theme::DIM),
                    );
                }
            }
            column += LABEL_STEP;
        }

        // Markers, stacked upwards from the axis on date collisions.
        let mut occupancy: HashMap<u16, u16> = HashMap::new();
        for (index, item) in self.items.iter().enumerate() {
            let Some(column) = column_for(item.start, origin, self.state, area.width) else {
                continue;
            };

            let stack = occupancy.entry(column).or_insert(0);
            let x = area.x + column;
            if *stack >= marker_rows {
                buf[(x, area.y)].set_symbol(OVERFLOW).set_style(Style::default().fg(theme::DIM));
                continue;
            }
            let y = axis_y - 1 - *stack;
            *stack += 1;

            let color = match item.party.as_deref() {
                Some(party) => theme::party_color(Some(party)),
                None => theme::media_color(item.media),
            };
            let selected = self.state.selected == Some(index);
            let (symbol, style) = if selected {
                (
                    MARKER_SELECTED,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )
            } else {
                (MARKER, Style::default().fg(color))
            };
            buf[(x, y)].set_symbol(symbol).set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use presswatch_models::MediaEvent;
    use presswatch_timeline::map_to_timeline_items;

    fn items(dates: &[&str]) -> Vec<TimelineItem> {
        let events: Vec<MediaEvent> = dates
            .iter()
            .map(|d| MediaEvent {
                date_announced: d.to_string(),
                headline: Some("h".to_string()),
                ..Default::default()
            })
            .collect();
        map_to_timeline_items(&events).items
    }

    #[test]
    fn test_fit_covers_full_range() {
        let items = items(&["01/01/2020", "31/12/2020"]);
        let mut state = TimelineState::default();
        state.fit(&items, 80);

        let (origin, last) = date_range(&items).unwrap();
        assert_eq!(state.selected, Some(0));
        assert!(column_for(last, origin, &state, 80).is_some());
    }

    #[test]
    fn test_column_math_scroll_and_zoom() {
        let items = items(&["01/01/2020", "15/01/2020"]);
        let (origin, _) = date_range(&items).unwrap();

        let state = TimelineState {
            scroll_offset: 0,
            days_per_column: 7.0,
            selected: None,
        };
        assert_eq!(column_for(origin, origin, &state, 80), Some(0));
        assert_eq!(column_for(items[1].start, origin, &state, 80), Some(2));

        let panned = TimelineState {
            scroll_offset: 14,
            ..state
        };
        // The first item falls off the left edge after panning right.
        assert_eq!(column_for(origin, origin, &panned, 80), None);
        assert_eq!(column_for(items[1].start, origin, &panned, 80), Some(0));
    }

    #[test]
    fn test_zoom_limits() {
        let mut state = TimelineState::default();
        for _ in 0..32 {
            state.zoom_in();
        }
        assert_eq!(state.days_per_column, MIN_DAYS_PER_COLUMN);

        for _ in 0..32 {
            state.zoom_out();
        }
        assert_eq!(state.days_per_column, MAX_DAYS_PER_COLUMN);
    }

    #[test]
    fn test_selection_wraps() {
        let mut state = TimelineState::default();
        state.select_next(3);
        assert_eq!(state.selected, Some(0));
        state.select_prev(3);
        assert_eq!(state.selected, Some(2));
        state.select_next(3);
        assert_eq!(state.selected, Some(0));
    }

    #[test]
    fn test_render_stacks_duplicate_dates() {
        let items = items(&["15/02/2020", "15/02/2020"]);
        let mut state = TimelineState::default();
        let area = Rect::new(0, 0, 40, 10);
        state.fit(&items, area.width);

        let mut buf = Buffer::empty(area);
        TimelineWidget::new(&items, &state).render(area, &mut buf);

        // Both markers land in column 0, stacked above the axis.
        let axis_y = area.height - AXIS_ROWS;
        assert_eq!(buf[(0, axis_y - 1)].symbol(), MARKER_SELECTED);
        assert_eq!(buf[(0, axis_y - 2)].symbol(), MARKER);
    }

    #[test]
    fn test_render_empty_items_is_noop() {
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        let state = TimelineState::default();
        TimelineWidget::new(&[], &state).render(area, &mut buf);

        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn test_render_draws_axis() {
        let items = items(&["15/02/2020"]);
        let mut state = TimelineState::default();
        let area = Rect::new(0, 0, 40, 10);
        state.fit(&items, area.width);

        let mut buf = Buffer::empty(area);
        TimelineWidget::new(&items, &state).render(area, &mut buf);

        let axis_y = area.height - AXIS_ROWS;
        assert_eq!(buf[(5, axis_y)].symbol(), "─");
    }
}
