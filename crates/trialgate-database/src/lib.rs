//! # trialgate-database
//!
//! MySQL connection management for the hosting platform's database and
//! the read-only repositories TrialGate queries, plus an in-memory
//! history store with the same interface.

pub mod connection;
pub mod memory;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::MemoryHostingHistory;
pub use repositories::HostingRepository;
