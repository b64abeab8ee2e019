//! Pull-based fallback for the push channel.
//!
//! The relay serves the latest snapshot at a plain HTTP endpoint as
//! `{"status": "success", "data": {...}}`. The dashboard fetches it on
//! start-up and on demand; the result is applied whenever it resolves.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::Result;
use crate::models::{FALLBACK_SUCCESS, FallbackResponse, RawSnapshot, snapshot_from_value};
use crate::tui::Message;

/// Per-request timeout for the fallback endpoint.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the HTTP client used for fallback fetches.
///
/// # Errors
///
/// Returns [`TickwatchError::Http`](crate::TickwatchError::Http) if the
/// client cannot be constructed.
pub fn build_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

/// Fetches the current snapshot from the fallback endpoint.
///
/// # Errors
///
/// Returns a [`TickwatchError`](crate::TickwatchError) if:
/// - The HTTP request fails or returns an error status
/// - The body is not JSON
/// - `status` is not `"success"` or `data` is not an object
pub async fn fetch_snapshot(client: &reqwest::Client, url: &str) -> Result<RawSnapshot> {
    let response = client.get(url).send().await?;
    let response = response.error_for_status()?;
    let body: FallbackResponse = serde_json::from_slice(&response.bytes().await?)?;

    if body.status.as_deref() != Some(FALLBACK_SUCCESS) {
        let reason = body
            .message
            .unwrap_or_else(|| format!("unexpected status {:?}", body.status));
        return Err(crate::TickwatchError::Fallback(reason));
    }

    let data = body.data.ok_or_else(|| {
        crate::TickwatchError::Fallback("response has no data".to_string())
    })?;
    let snapshot = snapshot_from_value(data).ok_or_else(|| {
        crate::TickwatchError::MalformedMessage("fallback data is not an object".to_string())
    })?;

    info!(symbols = snapshot.len(), "Fetched fallback snapshot");
    Ok(snapshot)
}

/// Spawns a fetch whose outcome is delivered to the main loop as
/// [`Message::FallbackLoaded`] or [`Message::FallbackFailed`].
pub fn spawn_fetch(client: reqwest::Client, url: String, tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        let message = match fetch_snapshot(&client, &url).await {
            Ok(snapshot) => Message::FallbackLoaded(snapshot),
            Err(e) => {
                warn!(error = %e, "Fallback fetch failed");
                Message::FallbackFailed(e.to_string())
            }
        };
        let _ = tx.send(message);
    });
}
