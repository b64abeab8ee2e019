//! Application state for the TUI.

use std::time::{Duration, Instant};

use crate::connection::{ChannelEvent, CloseReason, ConnectionTracker};
use crate::models::RawSnapshot;
use crate::reconcile::{ReconciledInstrument, Snapshot, SnapshotReconciler};
use crate::symbols;
use crate::view::{self, SignalCounts, SignalFilter};

use super::input::SearchInput;

/// How long an error stays in the status bar.
const ERROR_DISPLAY_DURATION: Duration = Duration::from_secs(5);

/// Braille spinner frames shown next to non-connected statuses.
pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Central application state container.
pub struct App {
    // -- Market Data --
    /// Latest reconciled snapshot and the baseline for the next one.
    pub reconciler: SnapshotReconciler,
    /// When the latest snapshot was applied.
    pub last_update: Option<Instant>,
    /// Where the latest snapshot came from.
    pub last_source: Option<DataSource>,

    // -- Connection State --
    pub connection: ConnectionTracker,
    /// Push channel state as last reported by the channel manager.
    pub link: ChannelLink,

    // -- Table State --
    pub filter: SignalFilter,
    pub search: SearchInput,
    /// Index of the first visible table row.
    pub scroll: usize,

    // -- UI State --
    pub mode: Mode,
    pub spinner_frame: usize,
    pub error_message: Option<ErrorDisplay>,

    // -- Internal --
    pub should_quit: bool,
}

impl App {
    /// Creates a new App in the initial connecting state.
    pub fn new() -> Self {
        Self {
            reconciler: SnapshotReconciler::new(),
            last_update: None,
            last_source: None,

            connection: ConnectionTracker::new(),
            link: ChannelLink::Connecting,

            filter: SignalFilter::All,
            search: SearchInput::new(),
            scroll: 0,

            mode: Mode::Normal,
            spinner_frame: 0,
            error_message: None,

            should_quit: false,
        }
    }

    /// Reconciles a snapshot and marks the connection as live.
    pub fn apply_snapshot(&mut self, snapshot: &RawSnapshot, source: DataSource) {
        self.reconciler.apply(snapshot);
        self.last_update = Some(Instant::now());
        self.last_source = Some(source);
        if source == DataSource::Channel {
            self.link = ChannelLink::Open;
        }
        self.connection.apply(&ChannelEvent::DataReceived);
        self.clamp_scroll();
    }

    /// Feeds a channel lifecycle event to the tracker and the link state.
    pub fn apply_channel_event(&mut self, event: &ChannelEvent) {
        match event {
            ChannelEvent::Opened => self.link = ChannelLink::Open,
            ChannelEvent::Closed(CloseReason::ClientInitiated) | ChannelEvent::ReconnectExhausted => {
                self.link = ChannelLink::Parked;
            }
            ChannelEvent::Closed(_)
            | ChannelEvent::ConnectError
            | ChannelEvent::ReconnectAttempt(_)
            | ChannelEvent::UserRetry => self.link = ChannelLink::Connecting,
            ChannelEvent::DataReceived => {}
        }
        self.connection.apply(event);
    }

    /// Records a failed fallback fetch.
    ///
    /// Counts as a connection failure only while the push channel is not
    /// open; an open channel keeps its status.
    pub fn fallback_failed(&mut self, error: &str) {
        if self.link != ChannelLink::Open {
            self.connection.apply(&ChannelEvent::ConnectError);
        }
        self.show_error(format!("Fallback fetch failed: {error}"));
    }

    /// Whether a manual retry is currently offered.
    ///
    /// A parked channel always offers one, even when fallback data keeps
    /// the status at connected.
    pub fn retry_available(&self) -> bool {
        self.connection.shows_retry() || self.link == ChannelLink::Parked
    }

    /// Applies a manual retry if one is currently offered.
    ///
    /// Returns `true` if a new connection attempt should be started.
    pub fn request_retry(&mut self) -> bool {
        if !self.retry_available() {
            return false;
        }
        self.link = ChannelLink::Connecting;
        self.connection.apply(&ChannelEvent::UserRetry)
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.reconciler.latest()
    }

    /// Rows passing the current filter and search, sorted by symbol.
    pub fn visible_rows(&self) -> Vec<&ReconciledInstrument> {
        view::visible_rows(self.snapshot(), self.filter, self.search.as_str())
    }

    pub fn index_row(&self) -> Option<&ReconciledInstrument> {
        view::index_row(self.snapshot())
    }

    pub fn signal_counts(&self) -> SignalCounts {
        view::signal_counts(&self.visible_rows())
    }

    /// Number of NIFTY50 constituents present in the latest snapshot.
    pub fn constituents_live(&self) -> usize {
        self.snapshot()
            .values()
            .filter(|row| symbols::is_constituent(row.symbol()))
            .count()
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    pub fn set_filter(&mut self, filter: SignalFilter) {
        self.filter = filter;
        self.scroll = 0;
    }

    pub fn scroll_down(&mut self) {
        self.scroll += 1;
        self.clamp_scroll();
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Keeps the scroll offset within the visible row count.
    pub fn clamp_scroll(&mut self) {
        let rows = self.visible_rows().len();
        self.scroll = self.scroll.min(rows.saturating_sub(1));
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(ErrorDisplay {
            message: message.into(),
            timestamp: Instant::now(),
        });
    }

    /// Advances the spinner and expires old errors.
    pub fn on_tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        if let Some(ref error) = self.error_message
            && error.timestamp.elapsed() > ERROR_DISPLAY_DURATION
        {
            self.error_message = None;
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Keystrokes edit the symbol search.
    Search,
}

/// Push channel state, independent of where the latest data came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelLink {
    /// Connecting, or backing off between attempts.
    #[default]
    Connecting,
    Open,
    /// Closed and waiting for a manual retry.
    Parked,
}

/// Origin of a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSource {
    Channel,
    Fallback,
}

impl DataSource {
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Channel => "live",
            DataSource::Fallback => "fallback",
        }
    }
}

/// Error message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct ErrorDisplay {
    pub message: String,
    pub timestamp: Instant,
}
