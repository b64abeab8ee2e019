//! Push-channel lifecycle management.
//!
//! [`ChannelManager`] owns the socket: it connects, forwards snapshots,
//! reports lifecycle events and retries with bounded exponential backoff.
//! [`ChannelHandle`] is the scoped owner used by the UI; opening spawns the
//! manager and closing (or dropping) the handle tears it down.

use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tungstenite::Message as WsMessage;

use super::state::{ChannelEvent, CloseReason};
use super::{WsStream, connect, parse_frame};
use crate::config::ReconnectConfig;
use crate::tui::Message;

/// How long [`ChannelHandle::close`] waits for a graceful shutdown.
const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// Commands sent from the main loop to the channel manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionCommand {
    /// Start a fresh connection attempt now, resetting the attempt budget.
    /// An open channel is closed and reopened.
    Retry,
    /// Close the channel and wait for a retry.
    Disconnect,
    /// Close the channel and stop the manager.
    Shutdown,
}

/// Why the reader loop exited.
enum ReadOutcome {
    Closed(CloseReason),
    /// A manual retry asked for a fresh connection.
    Restart,
    Shutdown,
}

/// What interrupted a wait.
enum Wake {
    Elapsed,
    Retry,
    Disconnect,
    Shutdown,
}

/// Owns the push channel and its reconnection loop.
pub struct ChannelManager {
    url: String,
    policy: ReconnectConfig,
    tx: mpsc::UnboundedSender<Message>,
    cmd_rx: mpsc::UnboundedReceiver<ConnectionCommand>,
}

impl ChannelManager {
    /// Creates a new channel manager.
    #[must_use]
    pub fn new(
        url: String,
        policy: ReconnectConfig,
        tx: mpsc::UnboundedSender<Message>,
        cmd_rx: mpsc::UnboundedReceiver<ConnectionCommand>,
    ) -> Self {
        Self {
            url,
            policy,
            tx,
            cmd_rx,
        }
    }

    /// Sends a lifecycle event to the main loop. Returns `false` once the
    /// main loop is gone.
    fn emit(&self, event: ChannelEvent) -> bool {
        self.tx.send(Message::Channel(event)).is_ok()
    }

    /// Runs until shut down.
    ///
    /// After `max_attempts` consecutive failures the manager reports
    /// [`ChannelEvent::ReconnectExhausted`] and waits for a manual retry.
    /// A client-initiated close also waits for a manual retry.
    pub async fn run(mut self) {
        let mut attempt: u32 = 0;

        loop {
            if attempt > 0 && !self.emit(ChannelEvent::ReconnectAttempt(attempt)) {
                return;
            }

            info!(url = %self.url, attempt, "Connecting to push channel");
            match tokio::time::timeout(self.policy.timeout, connect(&self.url)).await {
                Ok(Ok(stream)) => {
                    attempt = 0;
                    if !self.emit(ChannelEvent::Opened) {
                        return;
                    }
                    info!("Push channel connected");

                    match self.read_loop(stream).await {
                        ReadOutcome::Shutdown => {
                            info!("Channel manager shutting down");
                            return;
                        }
                        ReadOutcome::Restart => {
                            info!("Reopening push channel on manual retry");
                            continue;
                        }
                        ReadOutcome::Closed(CloseReason::ClientInitiated) => {
                            info!("Push channel closed by client");
                            if !self.emit(ChannelEvent::Closed(CloseReason::ClientInitiated)) {
                                return;
                            }
                            match self.wait_for_retry().await {
                                Wake::Retry => continue,
                                _ => return,
                            }
                        }
                        ReadOutcome::Closed(reason) => {
                            warn!(reason = ?reason, "Push channel lost");
                            if !self.emit(ChannelEvent::Closed(reason)) {
                                return;
                            }
                        }
                    }
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "Connection attempt failed");
                    if !self.emit(ChannelEvent::ConnectError) {
                        return;
                    }
                }
                Err(_) => {
                    warn!(
                        timeout_ms = self.policy.timeout.as_millis() as u64,
                        "Connection attempt timed out"
                    );
                    if !self.emit(ChannelEvent::ConnectError) {
                        return;
                    }
                }
            }

            attempt += 1;
            if attempt > self.policy.max_attempts {
                warn!(
                    max_attempts = self.policy.max_attempts,
                    "Reconnection attempts exhausted"
                );
                if !self.emit(ChannelEvent::ReconnectExhausted) {
                    return;
                }
                match self.wait_for_retry().await {
                    Wake::Retry => {
                        attempt = 0;
                        continue;
                    }
                    _ => return,
                }
            }

            let delay = self.policy.delay_for(attempt);
            info!(
                backoff_ms = delay.as_millis() as u64,
                attempt, "Backing off before retry"
            );
            match self.sleep_or_command(delay).await {
                Wake::Elapsed => {}
                Wake::Retry => attempt = 0,
                Wake::Disconnect => {
                    if !self.emit(ChannelEvent::Closed(CloseReason::ClientInitiated)) {
                        return;
                    }
                    match self.wait_for_retry().await {
                        Wake::Retry => attempt = 0,
                        _ => return,
                    }
                }
                Wake::Shutdown => return,
            }
        }
    }

    /// Forwards snapshots until the channel closes or a command ends it.
    async fn read_loop(&mut self, mut stream: WsStream) -> ReadOutcome {
        loop {
            tokio::select! {
                msg = stream.next() => {
                    match msg {
                        Some(Ok(WsMessage::Text(text))) => {
                            if let Some(snapshot) = parse_frame(text.as_str())
                                && self.tx.send(Message::Snapshot(snapshot)).is_err()
                            {
                                let _ = stream.close(None).await;
                                return ReadOutcome::Shutdown;
                            }
                        }
                        Some(Ok(WsMessage::Close(frame))) => {
                            let reason = frame
                                .map(|f| f.reason.to_string())
                                .filter(|r| !r.is_empty())
                                .unwrap_or_else(|| "server closed the channel".to_string());
                            return ReadOutcome::Closed(CloseReason::Other(reason));
                        }
                        Some(Ok(_)) => {} // Binary/Ping/Pong frames
                        Some(Err(e)) => {
                            warn!(error = %e, "WebSocket error");
                            return ReadOutcome::Closed(classify_error(&e));
                        }
                        None => {
                            warn!("WebSocket stream ended");
                            return ReadOutcome::Closed(CloseReason::TransportError);
                        }
                    }
                }

                cmd = self.cmd_rx.recv() => {
                    match cmd {
                        Some(ConnectionCommand::Retry) => {
                            let _ = stream.close(None).await;
                            return ReadOutcome::Restart;
                        }
                        Some(ConnectionCommand::Disconnect) => {
                            let _ = stream.close(None).await;
                            return ReadOutcome::Closed(CloseReason::ClientInitiated);
                        }
                        Some(ConnectionCommand::Shutdown) | None => {
                            let _ = stream.close(None).await;
                            return ReadOutcome::Shutdown;
                        }
                    }
                }

                () = self.tx.closed() => {
                    let _ = stream.close(None).await;
                    return ReadOutcome::Shutdown;
                }
            }
        }
    }

    /// Parks until the user retries or the manager is shut down.
    async fn wait_for_retry(&mut self) -> Wake {
        loop {
            tokio::select! {
                cmd = self.cmd_rx.recv() => match cmd {
                    Some(ConnectionCommand::Retry) => return Wake::Retry,
                    Some(ConnectionCommand::Disconnect) => {}
                    Some(ConnectionCommand::Shutdown) | None => return Wake::Shutdown,
                },
                () = self.tx.closed() => return Wake::Shutdown,
            }
        }
    }

    /// Sleeps for the backoff delay unless a command arrives first.
    async fn sleep_or_command(&mut self, delay: Duration) -> Wake {
        tokio::select! {
            () = tokio::time::sleep(delay) => Wake::Elapsed,
            cmd = self.cmd_rx.recv() => match cmd {
                Some(ConnectionCommand::Retry) => Wake::Retry,
                Some(ConnectionCommand::Disconnect) => Wake::Disconnect,
                Some(ConnectionCommand::Shutdown) | None => Wake::Shutdown,
            },
            () = self.tx.closed() => Wake::Shutdown,
        }
    }
}

/// Maps a read error onto a close reason.
fn classify_error(error: &tungstenite::Error) -> CloseReason {
    match error {
        tungstenite::Error::Io(e) if e.kind() == std::io::ErrorKind::TimedOut => {
            CloseReason::Timeout
        }
        _ => CloseReason::TransportError,
    }
}

/// Scoped owner of a running [`ChannelManager`].
///
/// Dropping the handle aborts the manager task; prefer [`close`](Self::close)
/// for a graceful close frame.
pub struct ChannelHandle {
    commands: mpsc::UnboundedSender<ConnectionCommand>,
    task: Option<JoinHandle<()>>,
}

impl ChannelHandle {
    /// Spawns a channel manager for `url`.
    pub fn open(url: String, policy: ReconnectConfig, tx: mpsc::UnboundedSender<Message>) -> Self {
        let (commands, cmd_rx) = mpsc::unbounded_channel();
        let manager = ChannelManager::new(url, policy, tx, cmd_rx);
        let task = tokio::spawn(manager.run());

        Self {
            commands,
            task: Some(task),
        }
    }

    /// Sends a command to the manager. Returns `false` if it has stopped.
    pub fn send(&self, command: ConnectionCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Asks the manager to start a fresh connection attempt.
    pub fn retry(&self) -> bool {
        self.send(ConnectionCommand::Retry)
    }

    /// Asks the manager to close the channel without reconnecting.
    pub fn disconnect(&self) -> bool {
        self.send(ConnectionCommand::Disconnect)
    }

    /// Closes the channel and waits for the manager to stop.
    pub async fn close(mut self) {
        let _ = self.commands.send(ConnectionCommand::Shutdown);
        if let Some(mut task) = self.task.take()
            && tokio::time::timeout(CLOSE_GRACE, &mut task).await.is_err()
        {
            warn!("Channel manager did not stop in time, aborting");
            task.abort();
        }
    }
}

impl Drop for ChannelHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
