//! Terminal User Interface for the quote dashboard.
//!
//! Provides a Ratatui-based TUI showing the reconciled quote table, the
//! index header and the connection status.

pub mod app;
pub mod components;
pub mod event;
pub mod input;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
