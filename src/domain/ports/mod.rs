//! Port trait definitions
//!
//! Interfaces the configuration core consumes from the host environment:
//! - HomeDirectory: current user home lookup for tag expansion

pub mod home_directory;

pub use home_directory::HomeDirectory;
