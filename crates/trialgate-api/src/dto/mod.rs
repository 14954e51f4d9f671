//! Data transfer objects for request/response serialization.

pub mod request;
pub mod response;
