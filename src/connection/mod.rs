//! Push-channel connectivity.
//!
//! This module is organized by concern:
//! - [`state`] - Connectivity state machine and user-facing status
//! - [`manager`] - Owned channel resource with bounded reconnection
//! - [`handler`] - Incoming frame processing

mod handler;
mod manager;
pub mod state;

use tokio::net::TcpStream;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::info;

use crate::Result;

pub use handler::parse_frame;
pub use manager::{ChannelHandle, ChannelManager, ConnectionCommand};
pub use state::{ChannelEvent, CloseReason, ConnectionPhase, ConnectionTracker};

/// A connected push channel.
pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Establishes a WebSocket connection to the given URL.
///
/// # Errors
///
/// Returns a [`TickwatchError`](crate::TickwatchError) if the connection or
/// handshake fails.
pub async fn connect(url: &str) -> Result<WsStream> {
    let (stream, _) = connect_async(url).await?;
    info!("WebSocket handshake completed");

    Ok(stream)
}
