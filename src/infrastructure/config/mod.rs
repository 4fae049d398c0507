//! Configuration management infrastructure
//!
//! Layered resolution of the worker configuration:
//! - YAML file over zero defaults (figment)
//! - Special-tag expansion against the host environment
//! - JSON wire encoding for coordinator/worker transfer

pub mod codec;
pub mod loader;
pub mod tags;

pub use loader::{ConfigLoader, Resolved};
pub use tags::{expand_special_tags, FixedHome, SystemHome, USER_HOME_TAG};
