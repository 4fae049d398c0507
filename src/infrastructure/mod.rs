//! Infrastructure layer module
//!
//! Adapters between the configuration model and the host:
//! - Configuration loading, tag expansion and wire encoding
//! - Logging infrastructure

pub mod config;
pub mod logging;
