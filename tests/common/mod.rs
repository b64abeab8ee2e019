//! Shared test utilities and constants.
#![allow(dead_code)]

use tickwatch::models::{RawSnapshot, snapshot_from_value};

/// Receipt timestamp used wherever a deterministic fallback is needed.
pub const RECEIVED_AT: &str = "2025-01-06T09:15:00+05:30";

/// Builds a raw snapshot from a JSON object literal.
pub fn snapshot(json: &str) -> RawSnapshot {
    let value: serde_json::Value = serde_json::from_str(json).expect("invalid test JSON");
    snapshot_from_value(value).expect("test JSON must be an object")
}

/// A single-symbol snapshot with the given OHLC, ltp and volume.
pub fn quote(symbol: &str, ltp: f64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> RawSnapshot {
    snapshot(&format!(
        r#"{{"{symbol}": {{"symbol": "{symbol}", "ltp": {ltp}, "open": {open}, "high": {high},
            "low": {low}, "close": {close}, "volume": {volume}}}}}"#
    ))
}
