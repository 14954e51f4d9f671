//! Hosting service history.

pub mod model;

pub use model::HostingRecord;
pub use trialgate_core::types::status::HostingStatus;
