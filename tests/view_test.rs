//! Table filtering, search and ordering tests.

mod common;

use tickwatch::models::TradingSignal;
use tickwatch::reconcile::{Snapshot, reconcile_at};
use tickwatch::view::{SignalFilter, index_row, signal_counts, visible_rows};

use common::{RECEIVED_AT, snapshot};

fn sample() -> Snapshot {
    // TCS and INFY are BUYs, WIPRO is a SELL, ITC is a HOLD.
    let raw = snapshot(
        r#"{
            "WIPRO-EQ": {"symbol": "WIPRO-EQ", "ltp": 98, "high": 100, "low": 97, "close": 100},
            "NIFTY50-INDEX": {"symbol": "NIFTY50-INDEX", "ltp": 110, "high": 111, "low": 109, "close": 100},
            "TCS-EQ": {"symbol": "TCS-EQ", "ltp": 102, "high": 103, "low": 100, "close": 100},
            "ITC-EQ": {"symbol": "ITC-EQ", "ltp": 100.5, "high": 101, "low": 99, "close": 100},
            "INFY-EQ": {"symbol": "INFY-EQ", "ltp": 103, "high": 104, "low": 100, "close": 100}
        }"#,
    );
    reconcile_at(&Snapshot::new(), &raw, RECEIVED_AT)
}

fn symbols(rows: &[&tickwatch::reconcile::ReconciledInstrument]) -> Vec<String> {
    rows.iter().map(|r| r.symbol().to_string()).collect()
}

#[test]
fn index_is_always_excluded_and_rows_sorted() {
    let snap = sample();
    let rows = visible_rows(&snap, SignalFilter::All, "");
    assert_eq!(symbols(&rows), ["INFY-EQ", "ITC-EQ", "TCS-EQ", "WIPRO-EQ"]);

    let index_search = visible_rows(&snap, SignalFilter::All, "nifty");
    assert!(index_search.is_empty());
}

#[test]
fn filter_by_exact_signal() {
    let snap = sample();
    let buys = visible_rows(&snap, SignalFilter::Only(TradingSignal::Buy), "");
    assert_eq!(symbols(&buys), ["INFY-EQ", "TCS-EQ"]);

    let sells = visible_rows(&snap, SignalFilter::Only(TradingSignal::Sell), "");
    assert_eq!(symbols(&sells), ["WIPRO-EQ"]);

    let holds = visible_rows(&snap, SignalFilter::Only(TradingSignal::Hold), "");
    assert_eq!(symbols(&holds), ["ITC-EQ"]);
}

#[test]
fn search_is_case_insensitive_substring() {
    let snap = sample();
    let rows = visible_rows(&snap, SignalFilter::All, "  iN ");
    assert_eq!(symbols(&rows), ["INFY-EQ"]);

    let combined = visible_rows(&snap, SignalFilter::Only(TradingSignal::Buy), "t");
    assert_eq!(symbols(&combined), ["TCS-EQ"]);
}

#[test]
fn index_row_and_counts() {
    let snap = sample();
    assert_eq!(index_row(&snap).map(|r| r.symbol()), Some("NIFTY50-INDEX"));

    let rows = visible_rows(&snap, SignalFilter::All, "");
    let counts = signal_counts(&rows);
    assert_eq!((counts.buy, counts.sell, counts.hold), (2, 1, 1));
}

#[test]
fn filter_cycles_through_all_options() {
    let mut filter = SignalFilter::All;
    let mut seen = Vec::new();
    for _ in 0..4 {
        filter = filter.next();
        seen.push(filter.label());
    }
    assert_eq!(seen, ["BUY", "SELL", "HOLD", "all"]);
}

#[test]
fn payload_index_flag_excludes_row() {
    let raw = snapshot(
        r#"{
            "BANKNIFTY-INDEX": {"ltp": 51000, "close": 50500, "is_index": true},
            "NIFTY50-INDEX": {"ltp": 23500, "close": 23450, "is_index": false},
            "SBIN-EQ": {"ltp": 800, "close": 790}
        }"#,
    );
    let snap = reconcile_at(&Snapshot::new(), &raw, RECEIVED_AT);

    let rows = visible_rows(&snap, SignalFilter::All, "");
    assert_eq!(symbols(&rows), ["SBIN-EQ"]);
    assert_eq!(index_row(&snap).map(|r| r.symbol()), Some("NIFTY50-INDEX"));
}
