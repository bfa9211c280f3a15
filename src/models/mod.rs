//! Database models shared across the CRM repository.

pub mod address;
pub mod city;
pub mod client;
#[cfg(feature = "server")]
pub mod config;
pub mod service_order;
