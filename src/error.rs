//! Crate-level error types.
//!
//! [`TickwatchError`] unifies every error source (configuration, push
//! channel, fallback HTTP, JSON, terminal I/O) behind a single enum so
//! callers can match on the variant they care about while still using the
//! `?` operator for easy propagation.
//!
//! The reconciliation and connection-tracking core never produces these:
//! malformed input degrades to safe defaults and channel failures become
//! state transitions.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TickwatchError>;

/// Top-level error type returned by all fallible public APIs.
#[derive(Debug, thiserror::Error)]
pub enum TickwatchError {
    /// An environment variable held an invalid value.
    #[error("configuration error: {0}")]
    Config(String),

    /// A WebSocket operation (connect, send, receive) failed.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The fallback HTTP request failed at the transport or status level.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Terminal or file I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// A message did not have the expected shape.
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// The fallback endpoint answered, but not with usable market data.
    #[error("fallback endpoint error: {0}")]
    Fallback(String),
}
