//! Repository implementations over the hosting platform's tables.

pub mod hosting;

pub use hosting::HostingRepository;
