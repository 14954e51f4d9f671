//! Core traits defined in `trialgate-core` and implemented by other crates.

pub mod history;

pub use history::HostingHistory;
