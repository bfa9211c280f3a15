//! Domain aggregates exposed by the CRM service layer.

pub mod address;
pub mod city;
pub mod client;
pub mod service_order;
pub mod types;
