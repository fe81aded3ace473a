//! Browser connection manager.
//!
//! Connects lazily to the configured CDP endpoint, opens one tab per
//! analyzed URL and hands out snapshots and capture devices for it.

mod manager_core;
mod manager_types;

pub use manager_core::{BrowserManager, BrowserPage};
pub use manager_types::BrowserError;

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
