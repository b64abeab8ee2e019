//! The NIFTY50 instrument universe shown by the dashboard.

/// The broad market index. It is rendered in the header and always
/// excluded from the filtered quote table.
pub const NIFTY_INDEX: &str = "NIFTY50-INDEX";

/// Exchange prefix used by the brokerage for every symbol.
pub const EXCHANGE_PREFIX: &str = "NSE:";

/// NIFTY50 constituents, without the exchange prefix.
pub const NIFTY50_SYMBOLS: [&str; 50] = [
    "ADANIENT-EQ",
    "ADANIPORTS-EQ",
    "APOLLOHOSP-EQ",
    "ASIANPAINT-EQ",
    "AXISBANK-EQ",
    "BAJAJ-AUTO-EQ",
    "BAJFINANCE-EQ",
    "BAJAJFINSV-EQ",
    "BEL-EQ",
    "BHARTIARTL-EQ",
    "BRITANNIA-EQ",
    "CIPLA-EQ",
    "COALINDIA-EQ",
    "DRREDDY-EQ",
    "EICHERMOT-EQ",
    "GRASIM-EQ",
    "HCLTECH-EQ",
    "HDFCBANK-EQ",
    "HDFCLIFE-EQ",
    "HEROMOTOCO-EQ",
    "HINDALCO-EQ",
    "HINDUNILVR-EQ",
    "ICICIBANK-EQ",
    "INFY-EQ",
    "INDUSINDBK-EQ",
    "ITC-EQ",
    "JIOFIN-EQ",
    "JSWSTEEL-EQ",
    "KOTAKBANK-EQ",
    "LT-EQ",
    "M&M-EQ",
    "MARUTI-EQ",
    "NTPC-EQ",
    "NESTLEIND-EQ",
    "ONGC-EQ",
    "POWERGRID-EQ",
    "RELIANCE-EQ",
    "SBILIFE-EQ",
    "SBIN-EQ",
    "SHRIRAMFIN-EQ",
    "SUNPHARMA-EQ",
    "TCS-EQ",
    "TATACONSUM-EQ",
    "TATAMOTORS-EQ",
    "TATASTEEL-EQ",
    "TECHM-EQ",
    "TITAN-EQ",
    "TRENT-EQ",
    "ULTRACEMCO-EQ",
    "WIPRO-EQ",
];

/// Returns `true` if `symbol` is the broad market index.
pub fn is_index(symbol: &str) -> bool {
    strip_exchange(symbol) == NIFTY_INDEX
}

/// Returns `true` if `symbol` is a NIFTY50 constituent.
pub fn is_constituent(symbol: &str) -> bool {
    NIFTY50_SYMBOLS.contains(&strip_exchange(symbol))
}

/// Removes the `NSE:` prefix if present.
pub fn strip_exchange(symbol: &str) -> &str {
    symbol.strip_prefix(EXCHANGE_PREFIX).unwrap_or(symbol)
}
