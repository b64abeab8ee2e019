//! Per-tick price metrics and the BUY/SELL/HOLD classification.
//!
//! Everything here is a pure function of the current quote. A zero `close`
//! has no defined percentage, so both percentages collapse to `0` and the
//! signal is forced to [`TradingSignal::Hold`].

use crate::models::{InstrumentQuote, TradingSignal};

/// Minimum absolute percentage move required for a BUY or SELL.
pub const CHANGE_THRESHOLD_PCT: f64 = 1.0;

/// Intraday range, as a percentage of close, above which no signal is given.
pub const VOLATILITY_CEILING_PCT: f64 = 5.0;

/// Derived price metrics for one quote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceMetrics {
    /// `ltp - close`.
    pub change: f64,
    /// `change / close * 100`, or `0` when `close` is zero.
    pub change_percent: f64,
    /// `(high - low) / close * 100`, or `0` when `close` is zero.
    pub volatility: f64,
}

/// Computes change, change percent and volatility for a quote.
pub fn metrics(ltp: f64, close: f64, high: f64, low: f64) -> PriceMetrics {
    let change = ltp - close;
    if close == 0.0 {
        return PriceMetrics {
            change,
            change_percent: 0.0,
            volatility: 0.0,
        };
    }

    PriceMetrics {
        change,
        change_percent: finite_or_zero(change / close * 100.0),
        volatility: finite_or_zero((high - low) / close * 100.0),
    }
}

/// Classifies a quote from its `ltp`, `close`, `high` and `low`.
pub fn classify(ltp: f64, close: f64, high: f64, low: f64) -> TradingSignal {
    if close == 0.0 {
        return TradingSignal::Hold;
    }

    let m = metrics(ltp, close, high, low);
    let trending_up = ltp > close;

    if trending_up && m.change_percent > CHANGE_THRESHOLD_PCT && m.volatility < VOLATILITY_CEILING_PCT
    {
        TradingSignal::Buy
    } else if !trending_up
        && m.change_percent < -CHANGE_THRESHOLD_PCT
        && m.volatility < VOLATILITY_CEILING_PCT
    {
        TradingSignal::Sell
    } else {
        TradingSignal::Hold
    }
}

/// Convenience wrapper for a normalized quote.
pub fn classify_quote(quote: &InstrumentQuote) -> TradingSignal {
    classify(quote.ltp, quote.close, quote.high, quote.low)
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_just_above_threshold() {
        assert_eq!(classify(101.0001, 100.0, 102.0, 99.0), TradingSignal::Buy);
    }

    #[test]
    fn hold_below_threshold() {
        assert_eq!(classify(100.9, 100.0, 102.0, 99.0), TradingSignal::Hold);
    }

    #[test]
    fn sell_just_below_negative_threshold() {
        assert_eq!(classify(98.9999, 100.0, 101.0, 99.0), TradingSignal::Sell);
    }

    #[test]
    fn exactly_one_percent_is_hold() {
        assert_eq!(classify(101.0, 100.0, 102.0, 99.0), TradingSignal::Hold);
        assert_eq!(classify(99.0, 100.0, 101.0, 98.0), TradingSignal::Hold);
    }

    #[test]
    fn high_volatility_suppresses_signal() {
        // +3% move but a 6% intraday range.
        assert_eq!(classify(103.0, 100.0, 104.0, 98.0), TradingSignal::Hold);
        assert_eq!(classify(97.0, 100.0, 103.0, 96.0), TradingSignal::Hold);
    }

    #[test]
    fn zero_close_forces_hold_and_zero_percentages() {
        assert_eq!(classify(50.0, 0.0, 60.0, 40.0), TradingSignal::Hold);
        let m = metrics(50.0, 0.0, 60.0, 40.0);
        assert_eq!(m.change, 50.0);
        assert_eq!(m.change_percent, 0.0);
        assert_eq!(m.volatility, 0.0);
    }

    #[test]
    fn metrics_match_hand_computation() {
        let m = metrics(2500.0, 2490.0, 2510.0, 2470.0);
        assert!((m.change - 10.0).abs() < 1e-9);
        assert!((m.change_percent - 10.0 / 2490.0 * 100.0).abs() < 1e-9);
        assert!((m.volatility - 40.0 / 2490.0 * 100.0).abs() < 1e-9);
    }
}
