//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::connection::ChannelEvent;
use crate::models::{RawSnapshot, TradingSignal};
use crate::view::SignalFilter;

use super::app::{App, DataSource, Mode};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),

    /// Snapshot pushed over the channel.
    Snapshot(RawSnapshot),
    /// Channel lifecycle event.
    Channel(ChannelEvent),

    /// Fallback endpoint returned a snapshot.
    FallbackLoaded(RawSnapshot),
    /// Fallback endpoint could not be used.
    FallbackFailed(String),

    /// Request to quit the application.
    Quit,
}

/// Actions that require external handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start a new connection attempt.
    Retry,
    /// Close the channel without reconnecting.
    Disconnect,
    /// Fetch a snapshot from the fallback endpoint.
    FetchFallback,
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {
                    if tx.is_closed() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Snapshot(snapshot) => {
            app.apply_snapshot(&snapshot, DataSource::Channel);
            None
        }
        Message::Channel(event) => {
            app.apply_channel_event(&event);
            None
        }
        Message::FallbackLoaded(snapshot) => {
            app.apply_snapshot(&snapshot, DataSource::Fallback);
            None
        }
        Message::FallbackFailed(error) => {
            app.fallback_failed(&error);
            None
        }
        Message::Quit => {
            app.should_quit = true;
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.on_tick();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Search => handle_search_mode(app, key),
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('r') => app.request_retry().then_some(Action::Retry),
        KeyCode::Char('d') => Some(Action::Disconnect),
        KeyCode::Char('f') => Some(Action::FetchFallback),

        // Search
        KeyCode::Char('/') => {
            app.mode = Mode::Search;
            None
        }
        KeyCode::Esc => {
            app.search.clear();
            app.clamp_scroll();
            None
        }

        // Signal filter
        KeyCode::Tab => {
            app.cycle_filter();
            None
        }
        KeyCode::Char('a') => {
            app.set_filter(SignalFilter::All);
            None
        }
        KeyCode::Char('b') => {
            app.set_filter(SignalFilter::Only(TradingSignal::Buy));
            None
        }
        KeyCode::Char('s') => {
            app.set_filter(SignalFilter::Only(TradingSignal::Sell));
            None
        }
        KeyCode::Char('h') => {
            app.set_filter(SignalFilter::Only(TradingSignal::Hold));
            None
        }

        // Scrolling
        KeyCode::Char('j') | KeyCode::Down => {
            app.scroll_down();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.scroll_up();
            None
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.scroll = 0;
            None
        }

        _ => None,
    }
}

/// Handles keys while editing the search query.
fn handle_search_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.mode = Mode::Normal,
        KeyCode::Char(c) => {
            app.search.insert(c);
            app.scroll = 0;
        }
        KeyCode::Backspace => {
            app.search.backspace();
            app.scroll = 0;
        }
        KeyCode::Left => app.search.move_left(),
        KeyCode::Right => app.search.move_right(),
        _ => {}
    }
    None
}
