//! # trialgate-entity
//!
//! Domain models for TrialGate. `hosting` mirrors rows of the platform's
//! service table; `cart` and `checkout` are the per-attempt inputs handed
//! over by the platform's checkout pipeline. All of them are read-only to
//! this system.

pub mod cart;
pub mod checkout;
pub mod hosting;

pub use cart::{CartLine, CartSnapshot};
pub use checkout::CheckoutContext;
pub use hosting::HostingRecord;
