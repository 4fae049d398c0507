//! Command-line surface of the worker configuration

pub mod flags;
pub mod resolve;

pub use flags::{bind_flags, FlagSet, ParsedFlags, WithFlags};
pub use resolve::resolve_from_args;
