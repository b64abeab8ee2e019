//! Snapshot reconciliation.
//!
//! Every incoming snapshot is diffed field-by-field against the previously
//! reconciled one to produce per-field change flags and directions, which
//! the table uses for highlighting. Only one step of history is kept.
//!
//! A symbol seen for the first time has no baseline: none of its fields are
//! reported as changed and no direction is given.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Direction, InstrumentQuote, QuoteField, RawSnapshot, TradingSignal};
use crate::signal;

/// Reconciled state for every symbol in the latest snapshot.
pub type Snapshot = BTreeMap<String, ReconciledInstrument>;

/// Change information for one numeric field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FieldDelta {
    /// `true` iff the value differs from the previous value for the symbol.
    pub changed: bool,
    /// Set only when `changed` is `true`.
    pub direction: Option<Direction>,
    /// Value from the previous snapshot; `None` on first appearance.
    pub previous: Option<f64>,
}

impl FieldDelta {
    /// Compares `current` against an optional baseline.
    pub fn between(previous: Option<f64>, current: f64) -> Self {
        let Some(prev) = previous else {
            return Self::default();
        };

        let direction = if current > prev {
            Some(Direction::Up)
        } else if current < prev {
            Some(Direction::Down)
        } else {
            None
        };

        Self {
            changed: direction.is_some(),
            direction,
            previous: Some(prev),
        }
    }
}

/// A normalized quote plus its derived metrics and per-field deltas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledInstrument {
    pub quote: InstrumentQuote,
    pub change: f64,
    pub change_percent: f64,
    pub trading_signal: TradingSignal,
    pub signal_changed: bool,
    deltas: [FieldDelta; 6],
}

impl ReconciledInstrument {
    /// Builds a record from a normalized quote and an optional baseline.
    pub fn from_quote(quote: InstrumentQuote, previous: Option<&ReconciledInstrument>) -> Self {
        let metrics = signal::metrics(quote.ltp, quote.close, quote.high, quote.low);
        let trading_signal = signal::classify_quote(&quote);

        let deltas = QuoteField::ALL
            .map(|field| FieldDelta::between(previous.map(|p| p.quote.get(field)), quote.get(field)));
        let signal_changed = previous.is_some_and(|p| p.trading_signal != trading_signal);

        Self {
            quote,
            change: metrics.change,
            change_percent: metrics.change_percent,
            trading_signal,
            signal_changed,
            deltas,
        }
    }

    /// Returns the delta for one of the six numeric fields.
    pub fn delta(&self, field: QuoteField) -> &FieldDelta {
        &self.deltas[field.index()]
    }

    /// Returns `true` if any numeric field or the signal changed.
    pub fn any_changed(&self) -> bool {
        self.signal_changed || self.deltas.iter().any(|d| d.changed)
    }

    /// Shorthand for the symbol.
    pub fn symbol(&self) -> &str {
        &self.quote.symbol
    }
}

/// Reconciles `incoming` against `previous`, stamping quotes without a
/// source timestamp with the current UTC time.
pub fn reconcile(previous: &Snapshot, incoming: &RawSnapshot) -> Snapshot {
    reconcile_at(previous, incoming, &chrono::Utc::now().to_rfc3339())
}

/// Reconciles `incoming` against `previous` using `received_at` as the
/// fallback timestamp.
///
/// Produces exactly one entry per key of `incoming`; symbols missing from
/// `incoming` are dropped. `previous` is only read.
pub fn reconcile_at(previous: &Snapshot, incoming: &RawSnapshot, received_at: &str) -> Snapshot {
    incoming
        .iter()
        .map(|(key, raw)| {
            let quote = InstrumentQuote::normalize(key, raw, received_at);
            let record = ReconciledInstrument::from_quote(quote, previous.get(key));
            (key.clone(), record)
        })
        .collect()
}

/// Holds the latest reconciled snapshot as the baseline for the next one.
#[derive(Debug, Default)]
pub struct SnapshotReconciler {
    latest: Snapshot,
}

impl SnapshotReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles a new snapshot and retains it as the next baseline.
    pub fn apply(&mut self, incoming: &RawSnapshot) -> &Snapshot {
        self.latest = reconcile(&self.latest, incoming);
        &self.latest
    }

    /// Like [`apply`](Self::apply) with an explicit receipt timestamp.
    pub fn apply_at(&mut self, incoming: &RawSnapshot, received_at: &str) -> &Snapshot {
        self.latest = reconcile_at(&self.latest, incoming, received_at);
        &self.latest
    }

    /// The most recent reconciled snapshot.
    pub fn latest(&self) -> &Snapshot {
        &self.latest
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}
