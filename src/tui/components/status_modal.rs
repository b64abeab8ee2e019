//! Connection status overlay shown whenever the channel is not connected.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::tui::app::App;

const MODAL_WIDTH: u16 = 60;
const MODAL_HEIGHT: u16 = 7;

/// Renders the status modal centered in `area`.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let phase = app.connection.phase();
    let popup = centered(area, MODAL_WIDTH, MODAL_HEIGHT);

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{} ", app.spinner()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(phase.message()),
    ])];

    if phase.shows_retry() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "Press r to retry",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let block = Block::default()
        .title(" Connection ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let para = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup);
    frame.render_widget(para, popup);
}

/// Returns a `width` x `height` rectangle centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
