//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::app::{App, Mode};
use super::components::{quote_table, status_bar, status_modal};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Index header
            Constraint::Length(1), // Status bar
            Constraint::Min(5),    // Quote table
            Constraint::Length(1), // Search / keybindings
        ])
        .split(area);

    render_index_header(frame, layout[0], app);
    status_bar::render(frame, layout[1], app);
    quote_table::render(frame, layout[2], app);
    render_footer(frame, layout[3], app);

    if app.connection.phase().shows_modal() {
        status_modal::render(frame, area, app);
    }
}

/// Renders the NIFTY50 index line above the table.
fn render_index_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = Span::styled(
        " NIFTY50 ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let line = match app.index_row() {
        Some(index) => {
            let color = if index.change >= 0.0 {
                Color::Green
            } else {
                Color::Red
            };
            let arrow = if index.change >= 0.0 { "▲" } else { "▼" };
            Line::from(vec![
                title,
                Span::styled(format!(" {arrow} "), Style::default().fg(color)),
                Span::styled(
                    format!("{:.2} ", index.quote.ltp),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:+.2} ({:+.2}%)", index.change, index.change_percent),
                    Style::default().fg(color),
                ),
            ])
        }
        None => Line::from(vec![
            title,
            Span::styled(" -- ", Style::default().fg(Color::DarkGray)),
        ]),
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Renders the search field while editing, otherwise the keybindings help.
fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = if app.mode == Mode::Search {
        let (before, after) = app.search.split_at_cursor();
        Line::from(vec![
            Span::styled(" / ", Style::default().fg(Color::Yellow)),
            Span::raw(before.to_string()),
            Span::styled("│", Style::default().fg(Color::Yellow)),
            Span::raw(after.to_string()),
        ])
    } else {
        let mut spans = vec![Span::styled(
            " q quit  / search  Tab filter  a/b/s/h all/buy/sell/hold  j/k scroll  f fetch  d disconnect",
            Style::default().fg(Color::DarkGray),
        )];
        if app.retry_available() {
            spans.push(Span::styled("  r retry", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line), area);
}
