//! Live NIFTY50 quote dashboard.
//!
//! Consumes market-data snapshots pushed by a relay over a WebSocket (with
//! an HTTP fallback), reconciles each snapshot against the previous one to
//! derive per-field changes and trading signals, tracks channel
//! connectivity, and renders everything in a terminal UI.

pub mod config;
pub mod connection;
pub mod error;
pub mod fallback;
pub mod models;
pub mod reconcile;
pub mod signal;
pub mod symbols;
pub mod tui;
pub mod view;

pub use error::{Result, TickwatchError};
