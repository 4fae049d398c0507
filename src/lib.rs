//! Worker configuration resolution
//!
//! Produces a single resolved configuration for a cloud game worker from
//! layered sources and moves it between processes.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): Configuration model, errors and ports
//! - **Infrastructure Layer** (`infrastructure`): File loading, tag expansion,
//!   wire codec and logging
//! - **CLI Layer** (`cli`): Flag binding and startup resolution
//!
//! # Example
//!
//! ```no_run
//! use worker_config::{resolve_from_args, SystemHome};
//!
//! fn main() -> anyhow::Result<()> {
//!     let resolved = resolve_from_args("worker", std::env::args_os(), &SystemHome)?;
//!     let payload = resolved.config.encode();
//!     assert!(!payload.is_empty());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use cli::{bind_flags, resolve_from_args, FlagSet, ParsedFlags, WithFlags};
pub use domain::models::{Config, Environment};
pub use domain::ports::HomeDirectory;
pub use domain::{CodecError, ExpandError, FlagError, SourceError};
pub use infrastructure::config::{
    expand_special_tags, ConfigLoader, FixedHome, Resolved, SystemHome, USER_HOME_TAG,
};
