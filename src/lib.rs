//! Builds a static scrollytelling deck over the New York housing listings.
//!
//! `core` loads and aggregates the CSV, `deck` owns the slide order and
//! navigation, and `report` draws charts and writes pages.

pub mod cli;
pub mod core;
pub mod deck;
pub mod report;
