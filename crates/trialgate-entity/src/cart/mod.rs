//! Shopping cart contents at checkout time.

pub mod snapshot;

pub use snapshot::{CartLine, CartSnapshot};
