//! Reusable widgets composed by [`render`](super::render).

pub mod quote_table;
pub mod status_bar;
pub mod status_modal;
