//! Filtering, search and ordering of reconciled rows for the quote table.

use crate::models::TradingSignal;
use crate::reconcile::{ReconciledInstrument, Snapshot};
use crate::symbols;

/// Signal filter applied to the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignalFilter {
    #[default]
    All,
    Only(TradingSignal),
}

impl SignalFilter {
    /// Returns `true` if `signal` passes this filter.
    pub fn matches(&self, signal: TradingSignal) -> bool {
        match self {
            SignalFilter::All => true,
            SignalFilter::Only(wanted) => *wanted == signal,
        }
    }

    /// Cycles All → BUY → SELL → HOLD → All.
    pub fn next(&self) -> Self {
        match self {
            SignalFilter::All => SignalFilter::Only(TradingSignal::Buy),
            SignalFilter::Only(TradingSignal::Buy) => SignalFilter::Only(TradingSignal::Sell),
            SignalFilter::Only(TradingSignal::Sell) => SignalFilter::Only(TradingSignal::Hold),
            SignalFilter::Only(TradingSignal::Hold) => SignalFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SignalFilter::All => "all",
            SignalFilter::Only(signal) => signal.as_str(),
        }
    }
}

/// Returns the rows to display: index rows are always excluded, then rows are
/// kept by exact signal match and case-insensitive symbol substring, and
/// sorted by symbol ascending.
pub fn visible_rows<'a>(
    snapshot: &'a Snapshot,
    filter: SignalFilter,
    query: &str,
) -> Vec<&'a ReconciledInstrument> {
    let needle = query.trim().to_lowercase();

    let mut rows: Vec<&ReconciledInstrument> = snapshot
        .values()
        .filter(|row| !row.quote.is_index)
        .filter(|row| filter.matches(row.trading_signal))
        .filter(|row| needle.is_empty() || row.symbol().to_lowercase().contains(&needle))
        .collect();

    rows.sort_by(|a, b| a.symbol().cmp(b.symbol()));
    rows
}

/// Returns the index row if present in the snapshot, preferring the
/// NIFTY50 index symbol over other rows flagged as an index.
pub fn index_row(snapshot: &Snapshot) -> Option<&ReconciledInstrument> {
    snapshot
        .values()
        .find(|row| symbols::is_index(row.symbol()))
        .or_else(|| snapshot.values().find(|row| row.quote.is_index))
}

/// Counts of each signal among `rows`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalCounts {
    pub buy: usize,
    pub sell: usize,
    pub hold: usize,
}

pub fn signal_counts(rows: &[&ReconciledInstrument]) -> SignalCounts {
    rows.iter()
        .fold(SignalCounts::default(), |mut acc, row| {
            match row.trading_signal {
                TradingSignal::Buy => acc.buy += 1,
                TradingSignal::Sell => acc.sell += 1,
                TradingSignal::Hold => acc.hold += 1,
            }
            acc
        })
}
