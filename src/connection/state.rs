//! Client-side belief about push-channel connectivity.
//!
//! [`ConnectionTracker`] consumes channel lifecycle events and the user's
//! retry action, and derives the status message, spinner and retry
//! affordance shown to the user.

/// Why the push channel closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The client closed the channel on purpose.
    ClientInitiated,
    /// The transport failed mid-stream.
    TransportError,
    /// The transport stopped responding in time.
    Timeout,
    /// Anything else, e.g. the server closing the channel.
    Other(String),
}

impl CloseReason {
    /// Returns `true` for reasons that indicate the server side is unreachable.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, CloseReason::TransportError | CloseReason::Timeout)
    }
}

/// Inputs to the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// The channel finished its handshake.
    Opened,
    /// The channel closed.
    Closed(CloseReason),
    /// A connection attempt failed.
    ConnectError,
    /// Automatic reconnect attempt `n` (1-based) is starting.
    ReconnectAttempt(u32),
    /// Every automatic attempt failed; only a manual retry remains.
    ReconnectExhausted,
    /// A valid snapshot arrived, which implies connectivity.
    DataReceived,
    /// The user explicitly asked to retry.
    UserRetry,
}

/// Observable connectivity state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionPhase {
    #[default]
    Connecting,
    Connected,
    Disconnected,
    Reconnecting,
    ServerIssueRetrying,
    ServerIssueFailed,
}

impl ConnectionPhase {
    /// Human-facing status message.
    pub fn message(&self) -> &'static str {
        match self {
            ConnectionPhase::Connecting => "Connecting to server...",
            ConnectionPhase::Connected => "Connected to server successfully!",
            ConnectionPhase::Disconnected => {
                "Disconnected from server. Please check your connection or retry."
            }
            ConnectionPhase::Reconnecting => "Attempting to reconnect to server...",
            ConnectionPhase::ServerIssueRetrying => {
                "Unable to connect to the server. It might be offline or experiencing issues. Retrying..."
            }
            ConnectionPhase::ServerIssueFailed => {
                "Failed to connect to the server. It appears to be offline or experiencing issues. Please try again later."
            }
        }
    }

    /// Short label for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionPhase::Connecting => "Connecting...",
            ConnectionPhase::Connected => "Online",
            ConnectionPhase::Disconnected => "Offline",
            ConnectionPhase::Reconnecting => "Reconnecting...",
            ConnectionPhase::ServerIssueRetrying => "Server issue, retrying...",
            ConnectionPhase::ServerIssueFailed => "Server unreachable",
        }
    }

    /// Whether the user is offered a manual retry.
    pub fn shows_retry(&self) -> bool {
        !matches!(self, ConnectionPhase::Connecting | ConnectionPhase::Connected)
    }

    /// Whether a busy indicator accompanies the message.
    pub fn shows_spinner(&self) -> bool {
        *self != ConnectionPhase::Connected
    }

    /// Whether the status modal is visible.
    pub fn shows_modal(&self) -> bool {
        *self != ConnectionPhase::Connected
    }
}

/// Tracks connectivity for one client session.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    phase: ConnectionPhase,
    server_issue: bool,
}

impl ConnectionTracker {
    /// Starts in [`ConnectionPhase::Connecting`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an event.
    ///
    /// Returns `true` when the event asks for a new connection attempt,
    /// which only [`ChannelEvent::UserRetry`] does.
    pub fn apply(&mut self, event: &ChannelEvent) -> bool {
        match event {
            ChannelEvent::Opened | ChannelEvent::DataReceived => {
                self.phase = ConnectionPhase::Connected;
                self.server_issue = false;
            }
            ChannelEvent::Closed(reason) => {
                if *reason == CloseReason::ClientInitiated {
                    self.phase = ConnectionPhase::Disconnected;
                } else if reason.is_transport_failure() {
                    self.phase = ConnectionPhase::ServerIssueRetrying;
                    self.server_issue = true;
                } else {
                    self.phase = ConnectionPhase::Reconnecting;
                }
            }
            ChannelEvent::ConnectError => {
                self.phase = ConnectionPhase::ServerIssueRetrying;
                self.server_issue = true;
            }
            // The server-issue flag survives an automatic attempt; only an
            // open channel, fresh data or a manual retry clears it.
            ChannelEvent::ReconnectAttempt(_) => {
                self.phase = ConnectionPhase::Reconnecting;
            }
            ChannelEvent::ReconnectExhausted => {
                self.phase = ConnectionPhase::ServerIssueFailed;
                self.server_issue = true;
            }
            ChannelEvent::UserRetry => {
                self.phase = ConnectionPhase::Reconnecting;
                self.server_issue = false;
                return true;
            }
        }
        false
    }

    /// The current phase.
    pub fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    /// Returns `true` while the channel is open and delivering.
    pub fn connected(&self) -> bool {
        self.phase == ConnectionPhase::Connected
    }

    /// Returns `true` while an automatic or manual reconnect is underway.
    pub fn reconnecting(&self) -> bool {
        matches!(
            self.phase,
            ConnectionPhase::Reconnecting | ConnectionPhase::ServerIssueRetrying
        )
    }

    /// Returns `true` if the last failure pointed at the server being down.
    pub fn server_issue(&self) -> bool {
        self.server_issue
    }

    /// The user-facing message for the current phase.
    pub fn message(&self) -> &'static str {
        self.phase.message()
    }

    /// Whether the retry affordance is shown for the current phase.
    pub fn shows_retry(&self) -> bool {
        self.phase.shows_retry()
    }
}
