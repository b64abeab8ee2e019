//! Incoming push-channel frame processing.

use tracing::{debug, warn};

use crate::models::{ChannelEnvelope, RawSnapshot, snapshot_from_value};

/// Extracts a snapshot from a text frame.
///
/// Frames that are not JSON, belong to another event, or carry no usable
/// `data` object are logged and dropped. This never fails.
pub fn parse_frame(text: &str) -> Option<RawSnapshot> {
    let envelope: ChannelEnvelope = match serde_json::from_str(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "Ignoring non-JSON channel frame");
            return None;
        }
    };

    if !envelope.is_market_data() {
        debug!(event = ?envelope.event, "Ignoring non market-data event");
        return None;
    }

    let Some(data) = envelope.data else {
        warn!("Ignoring market-data frame without data");
        return None;
    };

    match snapshot_from_value(data) {
        Some(snapshot) => {
            debug!(symbols = snapshot.len(), "Received market-data snapshot");
            Some(snapshot)
        }
        None => {
            warn!("Ignoring market-data frame whose data is not an object");
            None
        }
    }
}
