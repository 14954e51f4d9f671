//! Per-attempt checkout context.

pub mod context;

pub use context::CheckoutContext;
