//! View rendering for each controller state.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use super::app::App;
use super::controller::State;
use super::theme;
use super::timeline::TimelineWidget;

/// Draws the whole frame for the current state.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);

    match app.state() {
        State::Starting => draw_starting(frame, app, chunks[1]),
        State::Selector => draw_selector(frame, app, chunks[1]),
        State::Loading => draw_loading(frame, app, chunks[1]),
        State::Timeline => draw_timeline(frame, app, chunks[1]),
        State::Error => draw_error(frame, app, chunks[1]),
    }

    draw_footer(frame, app, chunks[2]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.active_project_name() {
        Some(name) => format!(" presswatch — {name} "),
        None => " presswatch — project media coverage ".to_string(),
    };
    let header = Paragraph::new(Line::from(Span::styled(
        title,
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(header, area);
}

fn draw_starting(frame: &mut Frame, app: &App, area: Rect) {
    centered_message(
        frame,
        area,
        &format!("Loading project directory {}", app.spinner()),
        Style::default().fg(theme::DIM),
    );
}

fn draw_selector(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let filter = Paragraph::new(app.filter.as_str())
        .block(Block::default().borders(Borders::ALL).title(" filter "));
    frame.render_widget(filter, chunks[0]);

    let filtered = app.filtered_projects();
    if filtered.is_empty() {
        let message = if app.controller.projects.is_empty() {
            "The project directory is empty."
        } else {
            "No projects match the filter."
        };
        centered_message(frame, chunks[1], message, Style::default().fg(theme::DIM));
        return;
    }

    let cursor = app.selected.min(filtered.len() - 1);
    let items: Vec<ListItem> = filtered
        .iter()
        .map(|&index| {
            let project = &app.controller.projects[index];
            let status = if project.is_completed() { "✓" } else { " " };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>6}  ", project.project_id),
                    Style::default().fg(theme::DIM),
                ),
                Span::raw(format!("{} {}", status, project.project_name)),
                Span::styled(
                    format!("  ({})", project.category),
                    Style::default().fg(theme::DIM),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" projects ({}) ", filtered.len())),
        )
        .highlight_style(
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::REVERSED),
        );

    // Stateful render keeps the cursor row scrolled into view on long
    // directories.
    let mut list_state = ListState::default();
    list_state.select(Some(cursor));
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}

fn draw_loading(frame: &mut Frame, app: &App, area: Rect) {
    centered_message(
        frame,
        area,
        &format!("Loading media coverage {}", app.spinner()),
        Style::default().fg(theme::DIM),
    );
}

fn draw_timeline(frame: &mut Frame, app: &mut App, area: Rect) {
    let batch = &app.controller.batch;

    if batch.is_empty() {
        let mut message = "No media coverage recorded for this project yet.".to_string();
        if !batch.skipped.is_empty() {
            message.push_str(&format!(
                "\n{} rows skipped (unreadable dates)",
                batch.skipped.len()
            ));
        }
        centered_message(frame, area, &message, Style::default().fg(theme::DIM));
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let timeline_block = Block::default().borders(Borders::ALL).title(" timeline ");
    let inner = timeline_block.inner(chunks[0]);
    frame.render_widget(timeline_block, chunks[0]);

    if app.pending_fit {
        app.timeline_state.fit(&app.controller.batch.items, inner.width);
        app.pending_fit = false;
    }

    let widget = TimelineWidget::new(&app.controller.batch.items, &app.timeline_state);
    frame.render_widget(widget, inner);

    draw_detail(frame, app, chunks[1]);
}

fn draw_detail(frame: &mut Frame, app: &App, area: Rect) {
    let batch = &app.controller.batch;
    let selected = app
        .timeline_state
        .selected
        .and_then(|index| batch.items.get(index));

    let block = Block::default().borders(Borders::ALL).title(" event ");
    let body = match selected {
        Some(item) => Paragraph::new(item.text.as_str())
            .style(Style::default().fg(theme::party_color(item.party.as_deref()))),
        None => Paragraph::new("Select an event with ↑/↓.").style(Style::default().fg(theme::DIM)),
    };
    frame.render_widget(body.block(block).wrap(Wrap { trim: false }), area);
}

fn draw_error(frame: &mut Frame, app: &App, area: Rect) {
    let Some(error) = app.controller.error.as_ref() else {
        return;
    };

    let style = if error.soft {
        Style::default().fg(theme::DIM)
    } else {
        Style::default().fg(theme::ERROR)
    };
    centered_message(frame, area, &error.message, style);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.state() {
        State::Starting => "Ctrl+C quit",
        State::Selector => "type to filter · ↑/↓ select · Enter open · Esc quit",
        State::Loading => "Esc cancel",
        State::Timeline => {
            if app.controller.batch.is_empty() {
                "Esc back"
            } else {
                "←/→ pan · +/- zoom · ↑/↓ select · f fit · Esc back"
            }
        }
        State::Error => "r retry · Esc back",
    };

    let mut line = hints.to_string();
    if app.state() == State::Timeline && !app.controller.batch.skipped.is_empty() {
        line = format!(
            "{} rows skipped (unreadable dates) · {line}",
            app.controller.batch.skipped.len()
        );
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        format!(" {line}"),
        Style::default().fg(theme::DIM),
    )));
    frame.render_widget(footer, area);
}

fn centered_message(frame: &mut Frame, area: Rect, message: &str, style: Style) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Min(1),
            Constraint::Percentage(40),
        ])
        .split(area);

    let body = Paragraph::new(message.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(body, vertical[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::App;
    use crate::tui::fetch::FetchMessage;
    use presswatch_models::Project;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::mpsc;

    fn app_with_projects(count: usize) -> App {
        let (cmd_tx, _cmd_rx) = tokio::sync::mpsc::unbounded_channel();
        let (msg_tx, msg_rx) = mpsc::channel();
        let mut app = App::new(cmd_tx, msg_rx, None);

        let projects = (1..=count)
            .map(|i| Project {
                project_id: i.to_string(),
                project_name: format!("Project {i:02}"),
                category: "Works".to_string(),
                completed_date: None,
            })
            .collect();
        msg_tx.send(FetchMessage::DirectoryLoaded(projects)).unwrap();
        app.on_tick();
        app
    }

    fn rendered_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_selector_keeps_cursor_row_in_view() {
        let mut app = app_with_projects(50);
        app.move_selection(40);

        // Far too small to show all 50 rows at once.
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = rendered_text(&terminal);
        assert!(text.contains("Project 41"));
        assert!(!text.contains("Project 01"));
    }

    #[test]
    fn test_selector_shows_first_rows_without_scrolling() {
        let mut app = app_with_projects(50);

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = rendered_text(&terminal);
        assert!(text.contains("Project 01"));
        assert!(!text.contains("Project 41"));
    }
}
