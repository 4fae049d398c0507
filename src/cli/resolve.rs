//! Process startup resolution: file, then flags

use std::ffi::OsString;
use std::path::PathBuf;

use super::flags::{bind_flags, FlagSet};
use crate::domain::error::FlagError;
use crate::domain::models::Config;
use crate::domain::ports::HomeDirectory;
use crate::infrastructure::config::{ConfigLoader, Resolved};

/// Resolve the worker configuration from the process arguments.
///
/// The file named by `-c/--conf` (if any) is resolved first, then every
/// flag is bound against the resolved values and applied on top.
pub fn resolve_from_args<I, T>(
    name: &'static str,
    args: I,
    home: &dyn HomeDirectory,
) -> Result<Resolved, FlagError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let config_path = scan_config_path(name, &args);

    let Resolved { mut config, source } =
        ConfigLoader::resolve_with_home(config_path.as_deref(), home)?;

    let flags = match config_path {
        Some(path) => FlagSet::new(name).with_config_path(path),
        None => FlagSet::new(name),
    };
    bind_flags(&mut config, flags, args)?;

    Ok(Resolved { config, source })
}

// Parse errors are left for the real binding to report.
fn scan_config_path(name: &'static str, args: &[OsString]) -> Option<PathBuf> {
    let mut scratch = Config::empty();
    bind_flags(&mut scratch, FlagSet::new(name), args.iter().cloned())
        .ok()?
        .config_path
}
