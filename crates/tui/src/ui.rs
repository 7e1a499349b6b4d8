//! UI rendering functions
//!
//! This module contains all the Ratatui rendering logic for the TUI.

use common::validation::Field;
use common::EventType;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::{App, InputMode, LogLevel};
use crate::form::FormController;

/// Primary colors for the UI
const ACCENT_COLOR: Color = Color::Cyan;
const SUCCESS_COLOR: Color = Color::Green;
const ERROR_COLOR: Color = Color::Red;
const WARNING_COLOR: Color = Color::Yellow;
const MUTED_COLOR: Color = Color::DarkGray;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    // Main layout: Header, Events, Logs, Footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Header with backend and filter
            Constraint::Min(6),     // Event table
            Constraint::Length(7),  // Logs
            Constraint::Length(3),  // Help footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_events(frame, app, chunks[1]);
    render_logs(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);

    // Render overlays
    if app.input_mode == InputMode::Help {
        render_help_overlay(frame);
    }

    if app.form.is_open() {
        render_add_dialog(frame, &app.form);
    }
}

/// Render the header with backend and filter
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let filter_spans: Vec<Span> = common::Filter::all()
        .iter()
        .flat_map(|filter| {
            let style = if *filter == app.filter {
                Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED_COLOR)
            };
            [Span::styled(filter.label(), style), Span::raw("  ")]
        })
        .collect();

    let header_text = vec![
        Line::from(vec![
            Span::raw("  Backend: "),
            Span::styled(&app.backend_url, Style::default().fg(Color::White)),
        ]),
        Line::from([vec![Span::raw("  Filter:  ")], filter_spans].concat()),
        Line::from(vec![
            Span::raw("  Events:  "),
            Span::styled(app.store.len().to_string(), Style::default().fg(SUCCESS_COLOR)),
        ]),
    ];

    let header = Paragraph::new(header_text).block(
        Block::default()
            .title(format!(" Playbill v{} ", env!("CARGO_PKG_VERSION")))
            .title_style(Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(ACCENT_COLOR)),
    );

    frame.render_widget(header, area);
}

fn type_color(kind: EventType) -> Color {
    match kind {
        EventType::Opera => Color::Magenta,
        EventType::Ballet => Color::LightBlue,
    }
}

/// Render the event table
fn render_events(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(["Date", "Time", "Title", "Composer", "Type", "Cover"])
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .store
        .events()
        .iter()
        .map(|event| {
            let draft = &event.draft;
            Row::new(vec![
                Cell::from(draft.date.clone()),
                Cell::from(draft.time.clone()),
                Cell::from(draft.title.clone()),
                Cell::from(draft.composer.clone()),
                Cell::from(draft.kind.label()).style(Style::default().fg(type_color(draft.kind))),
                Cell::from(draft.cover.clone()).style(Style::default().fg(MUTED_COLOR)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(13),
        Constraint::Length(6),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
        Constraint::Length(7),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ")
        .block(
            Block::default()
                .title(" Events ")
                .title_style(Style::default().fg(Color::White))
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(MUTED_COLOR)),
        );

    let mut state = TableState::default();
    if !app.store.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

/// Render the log viewer with colored levels
fn render_logs(frame: &mut Frame, app: &App, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;

    let log_lines: Vec<Line> = app
        .logs
        .iter()
        .skip(app.log_scroll)
        .take(visible_height)
        .map(|entry| {
            let (level_icon, level_color) = match entry.level {
                LogLevel::Info => ("•", MUTED_COLOR),
                LogLevel::Success => ("✓", SUCCESS_COLOR),
                LogLevel::Warning => ("⚠", WARNING_COLOR),
                LogLevel::Error => ("✗", ERROR_COLOR),
            };

            Line::from(vec![
                Span::styled(format!(" [{}] ", entry.timestamp), Style::default().fg(MUTED_COLOR)),
                Span::styled(format!("{} ", level_icon), Style::default().fg(level_color)),
                Span::styled(entry.message.clone(), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    let logs = Paragraph::new(log_lines).block(
        Block::default()
            .title(" Activity ")
            .title_style(Style::default().fg(Color::White))
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(MUTED_COLOR)),
    );

    frame.render_widget(logs, area);
}

fn key_hint(key: &'static str) -> Span<'static> {
    Span::styled(key, Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD))
}

/// Render the help footer
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.form.is_open() {
        Line::from(vec![
            key_hint(" [Tab]"),
            Span::raw(" next field  "),
            key_hint("[←/→]"),
            Span::raw(" type  "),
            key_hint("[Enter]"),
            Span::raw(" submit  "),
            key_hint("[Esc]"),
            Span::raw(" close"),
        ])
    } else {
        match app.input_mode {
            InputMode::Normal => Line::from(vec![
                key_hint(" [A]"),
                Span::raw("dd "),
                key_hint("[F]"),
                Span::raw("ilter "),
                key_hint("[R]"),
                Span::raw("eload "),
                key_hint("[H]"),
                Span::raw("elp "),
                key_hint("[Q]"),
                Span::raw("uit"),
            ]),
            InputMode::Help => Line::from(vec![Span::styled(
                " Press any key to close help",
                Style::default().fg(MUTED_COLOR),
            )]),
        }
    };

    let footer = Paragraph::new(help_text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(MUTED_COLOR)),
    );

    frame.render_widget(footer, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let bindings = [
        ("  A      ", "Add an event"),
        ("  F      ", "Cycle filter: All, Opera, Ballet"),
        ("  R      ", "Reload the event list"),
        ("  ↑/k    ", "Select previous event"),
        ("  ↓/j    ", "Select next event"),
        ("  g/G    ", "Jump to first/last event"),
        ("  H/?    ", "Show this help"),
        ("  Q/Esc  ", "Quit application"),
    ];

    let mut help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Keybindings",
            Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    help_text.extend(bindings.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(*key, Style::default().fg(ACCENT_COLOR)),
            Span::raw(*action),
        ])
    }));

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .title_style(Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_set(border::DOUBLE)
                .border_style(Style::default().fg(ACCENT_COLOR)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help, area);
}

/// Render the add-event dialog
fn render_add_dialog(frame: &mut Frame, form: &FormController) {
    let area = centered_rect(60, 80, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];

    for field in Field::all() {
        let focused = form.focus() == *field;
        let label_style = if focused {
            Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let value = match form.values().text(*field) {
            Some(text) => Span::styled(text.to_string(), Style::default().fg(Color::White)),
            None => match form.values().kind {
                Some(kind) => Span::styled(
                    format!("< {} >", kind.label()),
                    Style::default().fg(type_color(kind)),
                ),
                None => Span::styled("< Select Type >", Style::default().fg(MUTED_COLOR)),
            },
        };

        let mut spans = vec![
            Span::styled(if focused { " ▶ " } else { "   " }, label_style),
            Span::styled(format!("{:<10}", field.label()), label_style),
            value,
        ];
        if focused && field.is_text() {
            spans.push(Span::styled(
                "_",
                Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        lines.push(Line::from(spans));

        match form.errors().get(*field) {
            Some(message) => lines.push(Line::from(Span::styled(
                format!("             {}", message),
                Style::default().fg(ERROR_COLOR),
            ))),
            None => lines.push(Line::from("")),
        }
    }

    lines.push(Line::from(Span::styled(
        "   [Enter] Submit  [Esc] Close",
        Style::default().fg(MUTED_COLOR),
    )));

    let dialog = Paragraph::new(lines).block(
        Block::default()
            .title(" Add Event ")
            .title_style(Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_set(border::DOUBLE)
            .border_style(Style::default().fg(ACCENT_COLOR)),
    );

    frame.render_widget(dialog, area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::tests::{filled_form, MockApi};
    use crossterm::event::KeyCode;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_dialog_shows_field_errors() {
        let mut app = App::new(Box::new(MockApi::default()), "http://localhost:3004/events");
        app.form = filled_form();
        app.form.handle_key(KeyCode::Right);
        app.form.handle_key(KeyCode::Right);

        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut store = crate::store::EventStore::new();
        let api = MockApi::default();
        rt.block_on(app.form.submit(&api, &mut store));

        let text = screen(&app);
        assert!(text.contains("Add Event"));
        assert!(text.contains("Type is required"));
    }

    #[test]
    fn test_main_view_lists_backend() {
        let app = App::new(Box::new(MockApi::default()), "http://localhost:3004/events");
        let text = screen(&app);
        assert!(text.contains("http://localhost:3004/events"));
        assert!(text.contains("Events"));
    }
}
