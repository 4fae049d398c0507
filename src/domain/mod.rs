//! Domain layer for worker configuration
//!
//! This module contains the configuration model, its error types and the
//! ports the resolution pipeline depends on.

pub mod error;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use error::{CodecError, ExpandError, FlagError, SourceError};
