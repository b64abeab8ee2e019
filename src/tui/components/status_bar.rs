//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::connection::ConnectionPhase;
use crate::tui::app::App;

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let phase = app.connection.phase();
    let status_color = match phase {
        ConnectionPhase::Connected => Color::Green,
        ConnectionPhase::Connecting | ConnectionPhase::Reconnecting => Color::Yellow,
        ConnectionPhase::Disconnected
        | ConnectionPhase::ServerIssueRetrying
        | ConnectionPhase::ServerIssueFailed => Color::Red,
    };

    let status_text = if phase.shows_spinner() {
        format!(" {} {} ", app.spinner(), phase.label())
    } else {
        format!(" {} ", phase.label())
    };

    let freshness = match (app.last_update, app.last_source) {
        (Some(at), Some(source)) => Span::styled(
            format!(" {} {}s ago ", source.label(), at.elapsed().as_secs()),
            Style::default().fg(Color::White),
        ),
        _ => Span::styled(" no data ", Style::default().fg(Color::Gray)),
    };

    let counts = app.signal_counts();
    let counts_spans = vec![
        Span::styled(format!(" BUY {} ", counts.buy), Style::default().fg(Color::Green)),
        Span::styled(format!("SELL {} ", counts.sell), Style::default().fg(Color::Red)),
        Span::styled(format!("HOLD {} ", counts.hold), Style::default().fg(Color::Gray)),
    ];

    let filter_span = Span::styled(
        format!(" filter:{} ", app.filter.label()),
        Style::default().fg(Color::Cyan),
    );

    let search_span = if app.search.is_empty() {
        Span::raw("")
    } else {
        Span::styled(
            format!(" search:{} ", app.search.as_str()),
            Style::default().fg(Color::Cyan),
        )
    };

    let error_span = if let Some(ref error) = app.error_message {
        Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::raw("")
    };

    let live = format!(" {}/50 ", app.constituents_live());

    let mut spans = vec![
        Span::styled(status_text, Style::default().fg(status_color)),
        Span::raw("│"),
        freshness,
        Span::raw("│"),
    ];
    spans.extend(counts_spans);
    spans.extend(vec![
        Span::raw("│"),
        filter_span,
        search_span,
        Span::raw("│"),
        error_span,
        Span::raw(format!(
            "{:>width$}",
            live,
            width = area.width.saturating_sub(90) as usize
        )),
    ]);

    let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
