//! Per-instrument quote types and raw-field normalization.

use serde::{Deserialize, Serialize};

use crate::symbols;

/// Symbol used when neither the payload nor its key names the instrument.
pub const UNKNOWN_SYMBOL: &str = "UNKNOWN";

/// An ad-hoc quote payload exactly as it arrived on the wire.
///
/// Any field may be absent, `null`, a string or a number; the payload
/// itself may not even be an object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawQuote(pub serde_json::Value);

impl RawQuote {
    /// Looks up a field, treating a non-object payload as having no fields.
    fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.as_object().and_then(|map| map.get(name))
    }

    /// Reads a numeric field, substituting `0` for anything that is not a
    /// well-formed finite number. Numeric strings are accepted.
    pub fn number(&self, name: &str) -> f64 {
        let value = match self.field(name) {
            Some(serde_json::Value::Number(n)) => n.as_f64(),
            Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        value.filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    /// Reads a non-empty string field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Reads the source timestamp, accepting strings or epoch numbers.
    pub fn timestamp(&self) -> Option<String> {
        match self.field("timestamp")? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Reads a boolean field.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.field(name).and_then(|v| v.as_bool())
    }
}

/// The six raw numeric fields tracked for every instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuoteField {
    Ltp,
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl QuoteField {
    /// All fields in display order.
    pub const ALL: [QuoteField; 6] = [
        QuoteField::Ltp,
        QuoteField::Open,
        QuoteField::High,
        QuoteField::Low,
        QuoteField::Close,
        QuoteField::Volume,
    ];

    /// Returns the wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteField::Ltp => "ltp",
            QuoteField::Open => "open",
            QuoteField::High => "high",
            QuoteField::Low => "low",
            QuoteField::Close => "close",
            QuoteField::Volume => "volume",
        }
    }

    /// Position of the field inside [`QuoteField::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Direction of a changed numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Per-tick trading classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradingSignal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl TradingSignal {
    /// Returns the display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            TradingSignal::Buy => "BUY",
            TradingSignal::Sell => "SELL",
            TradingSignal::Hold => "HOLD",
        }
    }
}

/// A normalized quote for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentQuote {
    pub symbol: String,
    pub ltp: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Source timestamp, or local receipt time when the source sent none.
    pub timestamp: String,
    /// Whether this row is the broad market index rather than a stock.
    ///
    /// Set by the payload's `is_index` flag or by the well-known index
    /// symbol; a payload cannot clear it for the index symbol.
    pub is_index: bool,
}

impl InstrumentQuote {
    /// Normalizes a raw payload keyed by `key`.
    ///
    /// The symbol comes from the payload's `symbol` field, then from `key`,
    /// then falls back to [`UNKNOWN_SYMBOL`]. Never fails.
    pub fn normalize(key: &str, raw: &RawQuote, received_at: &str) -> Self {
        let symbol = raw
            .text("symbol")
            .or_else(|| Some(key.trim()).filter(|k| !k.is_empty()))
            .unwrap_or(UNKNOWN_SYMBOL)
            .to_string();
        let is_index = raw.flag("is_index").unwrap_or(false) || symbols::is_index(&symbol);

        Self {
            ltp: raw.number("ltp"),
            open: raw.number("open"),
            high: raw.number("high"),
            low: raw.number("low"),
            close: raw.number("close"),
            volume: raw.number("volume"),
            timestamp: raw
                .timestamp()
                .unwrap_or_else(|| received_at.to_string()),
            is_index,
            symbol,
        }
    }

    /// Returns the value of one of the six numeric fields.
    pub fn get(&self, field: QuoteField) -> f64 {
        match field {
            QuoteField::Ltp => self.ltp,
            QuoteField::Open => self.open,
            QuoteField::High => self.high,
            QuoteField::Low => self.low,
            QuoteField::Close => self.close,
            QuoteField::Volume => self.volume,
        }
    }
}
