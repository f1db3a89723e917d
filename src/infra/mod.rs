//! Outbound integrations.

pub mod value_api;
