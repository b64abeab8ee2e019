//! The live quote table.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
};
use unicode_width::UnicodeWidthChar;

use crate::models::{Direction, QuoteField, TradingSignal};
use crate::reconcile::ReconciledInstrument;
use crate::tui::app::App;

/// Width of the symbol column.
const SYMBOL_WIDTH: u16 = 16;

const HEADERS: [&str; 10] = [
    "Symbol", "LTP", "Open", "High", "Low", "Close", "Volume", "Change", "Chg %", "Signal",
];

/// Renders the filtered, sorted quote table starting at the scroll offset.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let rows = app.visible_rows();
    let total = rows.len();

    let header = Row::new(HEADERS.map(Cell::from))
        .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan));

    let body: Vec<Row> = rows
        .into_iter()
        .skip(app.scroll)
        .map(quote_row)
        .collect();

    let title = format!(" Quotes ({total}) ");
    let widths = [
        Constraint::Length(SYMBOL_WIDTH),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(6),
    ];

    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL));

    frame.render_widget(table, area);
}

/// Builds one table row, highlighting fields that moved since the last snapshot.
fn quote_row(row: &ReconciledInstrument) -> Row<'static> {
    let price = |field: QuoteField| {
        let text = match field {
            QuoteField::Volume => format!("{:.0}", row.quote.volume),
            _ => format!("{:.2}", row.quote.get(field)),
        };
        Cell::from(Span::styled(text, delta_style(row, field)))
    };

    let change_color = if row.change > 0.0 {
        Color::Green
    } else if row.change < 0.0 {
        Color::Red
    } else {
        Color::Gray
    };

    let mut signal_style = Style::default().fg(signal_color(row.trading_signal));
    if row.signal_changed {
        signal_style = signal_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }

    Row::new(vec![
        Cell::from(truncate(row.symbol(), SYMBOL_WIDTH as usize)),
        price(QuoteField::Ltp),
        price(QuoteField::Open),
        price(QuoteField::High),
        price(QuoteField::Low),
        price(QuoteField::Close),
        price(QuoteField::Volume),
        Cell::from(Span::styled(
            format!("{:+.2}", row.change),
            Style::default().fg(change_color),
        )),
        Cell::from(Span::styled(
            format!("{:+.2}", row.change_percent),
            Style::default().fg(change_color),
        )),
        Cell::from(Span::styled(row.trading_signal.as_str(), signal_style)),
    ])
}

fn delta_style(row: &ReconciledInstrument, field: QuoteField) -> Style {
    let delta = row.delta(field);
    match (delta.changed, delta.direction) {
        (true, Some(Direction::Up)) => Style::default().fg(Color::Black).bg(Color::Green),
        (true, Some(Direction::Down)) => Style::default().fg(Color::Black).bg(Color::Red),
        _ => Style::default(),
    }
}

fn signal_color(signal: TradingSignal) -> Color {
    match signal {
        TradingSignal::Buy => Color::Green,
        TradingSignal::Sell => Color::Red,
        TradingSignal::Hold => Color::Gray,
    }
}

/// Cuts `text` to at most `width` terminal columns.
fn truncate(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}
