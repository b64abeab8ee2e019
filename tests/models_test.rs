//! Wire model and frame parsing tests.

use serde_json::json;
use tickwatch::connection::parse_frame;
use tickwatch::models::{ChannelEnvelope, RawQuote};

#[test]
fn parses_market_data_event() {
    let frame = r#"{"event": "market_data", "data": {"INFY-EQ": {"ltp": 1500}, "TCS-EQ": {"ltp": 3900}}}"#;
    let snapshot = parse_frame(frame).expect("market data frame");
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot["INFY-EQ"].number("ltp"), 1500.0);
}

#[test]
fn accepts_bare_data_frame() {
    let snapshot = parse_frame(r#"{"data": {"ITC-EQ": {"ltp": 450.5}}}"#).expect("bare frame");
    assert_eq!(snapshot["ITC-EQ"].number("ltp"), 450.5);
}

#[test]
fn drops_unusable_frames() {
    assert!(parse_frame("not json").is_none());
    assert!(parse_frame(r#"{"event": "heartbeat", "data": {"A": {}}}"#).is_none());
    assert!(parse_frame(r#"{"event": "market_data"}"#).is_none());
    assert!(parse_frame(r#"{"event": "market_data", "data": [1, 2]}"#).is_none());
    assert!(parse_frame(r#"{"event": "market_data", "data": null}"#).is_none());
}

#[test]
fn empty_data_object_is_an_empty_snapshot() {
    let snapshot = parse_frame(r#"{"event": "market_data", "data": {}}"#).expect("empty snapshot");
    assert!(snapshot.is_empty());
}

#[test]
fn envelope_event_matching() {
    let bare: ChannelEnvelope = serde_json::from_str(r#"{"data": {}}"#).unwrap();
    assert!(bare.is_market_data());

    let other: ChannelEnvelope = serde_json::from_str(r#"{"event": "status"}"#).unwrap();
    assert!(!other.is_market_data());
}

#[test]
fn raw_quote_number_coercion() {
    let raw = RawQuote(json!({
        "ltp": 12.5,
        "close": "10",
        "open": "1e400",
        "high": "",
        "low": false,
        "volume": null
    }));

    assert_eq!(raw.number("ltp"), 12.5);
    assert_eq!(raw.number("close"), 10.0);
    assert_eq!(raw.number("open"), 0.0);
    assert_eq!(raw.number("high"), 0.0);
    assert_eq!(raw.number("low"), 0.0);
    assert_eq!(raw.number("volume"), 0.0);
    assert_eq!(raw.number("missing"), 0.0);

    let scalar = RawQuote(json!("garbage"));
    assert_eq!(scalar.number("ltp"), 0.0);
    assert_eq!(scalar.text("symbol"), None);
}

#[test]
fn raw_quote_text_and_timestamp() {
    let raw = RawQuote(json!({"symbol": "  SBIN-EQ ", "timestamp": 1736135100, "is_index": false}));
    assert_eq!(raw.text("symbol"), Some("SBIN-EQ"));
    assert_eq!(raw.timestamp().as_deref(), Some("1736135100"));
    assert_eq!(raw.flag("is_index"), Some(false));

    let blank = RawQuote(json!({"symbol": "", "timestamp": "  "}));
    assert_eq!(blank.text("symbol"), None);
    assert_eq!(blank.timestamp(), None);
}
