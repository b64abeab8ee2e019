//! Dashboard state and key handling tests.

mod common;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use tickwatch::connection::{ChannelEvent, CloseReason, ConnectionPhase};
use tickwatch::models::TradingSignal;
use tickwatch::tui::app::{ChannelLink, DataSource, Mode};
use tickwatch::tui::event::update;
use tickwatch::tui::{Action, App, Event, Message};
use tickwatch::view::SignalFilter;

use common::snapshot;

fn key(app: &mut App, code: KeyCode) -> Option<Action> {
    update(app, Message::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        key(app, KeyCode::Char(c));
    }
}

fn market() -> tickwatch::models::RawSnapshot {
    snapshot(
        r#"{
            "NIFTY50-INDEX": {"ltp": 23500, "high": 23550, "low": 23400, "close": 23450},
            "INFY-EQ": {"ltp": 103, "high": 104, "low": 100, "close": 100},
            "TCS-EQ": {"ltp": 102, "high": 103, "low": 100, "close": 100},
            "WIPRO-EQ": {"ltp": 98, "high": 100, "low": 97, "close": 100},
            "ZOMATO-EQ": {"ltp": 100.2, "high": 101, "low": 99, "close": 100}
        }"#,
    )
}

#[test]
fn snapshot_marks_connection_live() {
    let mut app = App::new();
    assert_eq!(app.connection.phase(), ConnectionPhase::Connecting);

    update(&mut app, Message::Snapshot(market()));

    assert!(app.connection.connected());
    assert_eq!(app.last_source, Some(DataSource::Channel));
    assert_eq!(app.visible_rows().len(), 4);
    assert_eq!(app.index_row().map(|r| r.symbol()), Some("NIFTY50-INDEX"));
    assert_eq!(app.constituents_live(), 3);
}

#[test]
fn fallback_results_drive_status() {
    let mut app = App::new();

    update(&mut app, Message::FallbackFailed("connection refused".to_string()));
    assert_eq!(app.connection.phase(), ConnectionPhase::ServerIssueRetrying);
    assert!(app.error_message.is_some());

    update(&mut app, Message::FallbackLoaded(market()));
    assert!(app.connection.connected());
    assert!(!app.connection.server_issue());
    assert_eq!(app.last_source, Some(DataSource::Fallback));
}

#[test]
fn retry_key_only_when_offered() {
    let mut app = App::new();
    assert_eq!(key(&mut app, KeyCode::Char('r')), None);

    update(&mut app, Message::Channel(ChannelEvent::Opened));
    assert_eq!(key(&mut app, KeyCode::Char('r')), None);

    update(
        &mut app,
        Message::Channel(ChannelEvent::Closed(CloseReason::TransportError)),
    );
    update(&mut app, Message::Channel(ChannelEvent::ReconnectExhausted));
    assert_eq!(app.connection.phase(), ConnectionPhase::ServerIssueFailed);

    assert_eq!(key(&mut app, KeyCode::Char('r')), Some(Action::Retry));
    assert_eq!(app.connection.phase(), ConnectionPhase::Reconnecting);
    assert!(!app.connection.server_issue());
}

#[test]
fn action_keys() {
    let mut app = App::new();
    assert_eq!(key(&mut app, KeyCode::Char('d')), Some(Action::Disconnect));
    assert_eq!(key(&mut app, KeyCode::Char('f')), Some(Action::FetchFallback));

    key(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);
}

#[test]
fn filter_keys_select_and_cycle() {
    let mut app = App::new();
    update(&mut app, Message::Snapshot(market()));

    key(&mut app, KeyCode::Char('b'));
    assert_eq!(app.filter, SignalFilter::Only(TradingSignal::Buy));
    assert_eq!(app.visible_rows().len(), 2);
    let counts = app.signal_counts();
    assert_eq!((counts.buy, counts.sell, counts.hold), (2, 0, 0));

    key(&mut app, KeyCode::Char('s'));
    assert_eq!(app.visible_rows().len(), 1);

    key(&mut app, KeyCode::Tab);
    assert_eq!(app.filter, SignalFilter::Only(TradingSignal::Hold));

    key(&mut app, KeyCode::Tab);
    assert_eq!(app.filter, SignalFilter::All);

    key(&mut app, KeyCode::Char('h'));
    key(&mut app, KeyCode::Char('a'));
    assert_eq!(app.filter, SignalFilter::All);
}

#[test]
fn search_mode_edits_query() {
    let mut app = App::new();
    update(&mut app, Message::Snapshot(market()));

    key(&mut app, KeyCode::Char('/'));
    assert_eq!(app.mode, Mode::Search);

    // Filter keys are plain text while searching.
    type_text(&mut app, "tcx");
    key(&mut app, KeyCode::Backspace);
    type_text(&mut app, "s");
    assert_eq!(app.search.as_str(), "tcs");
    assert_eq!(app.filter, SignalFilter::All);

    key(&mut app, KeyCode::Enter);
    assert_eq!(app.mode, Mode::Normal);
    let rows = app.visible_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].symbol(), "TCS-EQ");

    key(&mut app, KeyCode::Esc);
    assert!(app.search.is_empty());
    assert_eq!(app.visible_rows().len(), 4);
}

#[test]
fn scrolling_is_clamped() {
    let mut app = App::new();
    update(&mut app, Message::Snapshot(market()));

    for _ in 0..10 {
        key(&mut app, KeyCode::Char('j'));
    }
    assert_eq!(app.scroll, 3);

    key(&mut app, KeyCode::Char('k'));
    assert_eq!(app.scroll, 2);

    key(&mut app, KeyCode::Char('g'));
    assert_eq!(app.scroll, 0);

    key(&mut app, KeyCode::Up);
    assert_eq!(app.scroll, 0);
}

#[test]
fn tick_advances_spinner() {
    let mut app = App::new();
    let first = app.spinner();
    update(&mut app, Message::Input(Event::Tick));
    assert_ne!(app.spinner(), first);
}

#[test]
fn fallback_data_keeps_retry_for_exhausted_channel() {
    let mut app = App::new();
    update(&mut app, Message::Channel(ChannelEvent::ConnectError));
    update(&mut app, Message::Channel(ChannelEvent::ReconnectExhausted));

    update(&mut app, Message::FallbackLoaded(market()));
    assert_eq!(app.connection.phase(), ConnectionPhase::Connected);
    assert_eq!(app.link, ChannelLink::Parked);
    assert!(app.retry_available());

    assert_eq!(key(&mut app, KeyCode::Char('r')), Some(Action::Retry));
    assert_eq!(app.link, ChannelLink::Connecting);
    assert_eq!(app.connection.phase(), ConnectionPhase::Reconnecting);

    update(&mut app, Message::Channel(ChannelEvent::Opened));
    assert!(app.connection.connected());
    assert_eq!(key(&mut app, KeyCode::Char('r')), None);
}

#[test]
fn fallback_data_keeps_retry_after_manual_disconnect() {
    let mut app = App::new();
    update(&mut app, Message::Channel(ChannelEvent::Opened));
    update(
        &mut app,
        Message::Channel(ChannelEvent::Closed(CloseReason::ClientInitiated)),
    );
    update(&mut app, Message::FallbackLoaded(market()));

    assert_eq!(app.connection.phase(), ConnectionPhase::Connected);
    assert_eq!(key(&mut app, KeyCode::Char('r')), Some(Action::Retry));
}

#[test]
fn fallback_failure_leaves_open_channel_connected() {
    let mut app = App::new();
    update(&mut app, Message::Channel(ChannelEvent::Opened));

    update(&mut app, Message::FallbackFailed("timed out".to_string()));

    assert_eq!(app.connection.phase(), ConnectionPhase::Connected);
    assert!(app.error_message.is_some());
    assert_eq!(key(&mut app, KeyCode::Char('r')), None);
}

#[test]
fn channel_snapshot_marks_link_open() {
    let mut app = App::new();
    update(&mut app, Message::FallbackLoaded(market()));
    assert_eq!(app.link, ChannelLink::Connecting);

    update(&mut app, Message::Snapshot(market()));
    assert_eq!(app.link, ChannelLink::Open);
}
