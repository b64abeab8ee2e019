//! Wire models for the relay's push channel and fallback endpoint.
//!
//! Contains the data-event envelope, the fallback response body and the
//! per-instrument quote types they carry.

pub mod quote;

use std::collections::BTreeMap;

use serde::Deserialize;

pub use quote::{Direction, InstrumentQuote, QuoteField, RawQuote, TradingSignal, UNKNOWN_SYMBOL};

/// Name of the channel event that carries a market-data snapshot.
pub const MARKET_DATA_EVENT: &str = "market_data";

/// Status value the fallback endpoint reports on success.
pub const FALLBACK_SUCCESS: &str = "success";

/// A full mapping of symbol to raw quote delivered at one point in time.
pub type RawSnapshot = BTreeMap<String, RawQuote>;

/// A data-bearing frame received on the push channel.
///
/// `event` is optional so bare `{"data": {...}}` frames are accepted too.
#[derive(Debug, Deserialize)]
pub struct ChannelEnvelope {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl ChannelEnvelope {
    /// Returns `true` if the frame is a market-data event.
    pub fn is_market_data(&self) -> bool {
        self.event.as_deref().is_none_or(|e| e == MARKET_DATA_EVENT)
    }
}

/// Body returned by the fallback market-data endpoint.
#[derive(Debug, Deserialize)]
pub struct FallbackResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Converts a `data` payload into a snapshot.
///
/// Returns `None` unless the payload is a JSON object; individual quotes
/// are kept as-is and normalized later.
pub fn snapshot_from_value(data: serde_json::Value) -> Option<RawSnapshot> {
    match data {
        serde_json::Value::Object(map) => Some(
            map.into_iter()
                .map(|(symbol, quote)| (symbol, RawQuote(quote)))
                .collect(),
        ),
        _ => None,
    }
}
