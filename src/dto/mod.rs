//! JSON shapes returned by the API.

pub mod client;
pub mod error;
pub mod service_order;
