//! Shared value types used across TrialGate crates.

pub mod id;
pub mod lookup;
pub mod status;

pub use id::{ClientId, ProductId};
pub use lookup::{HistoryOwner, HistoryQuery, StatusFilter};
pub use status::HostingStatus;
