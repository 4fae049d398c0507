//! Home directory port

use std::path::PathBuf;

/// Port for looking up the current user's home directory
///
/// Tag expansion resolves `{user}` through this trait so callers can pin the
/// lookup to a fixed directory instead of the host environment.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use worker_config::domain::ports::HomeDirectory;
///
/// struct Fixed;
///
/// impl HomeDirectory for Fixed {
///     fn home_dir(&self) -> Option<PathBuf> {
///         Some(PathBuf::from("/home/worker"))
///     }
/// }
///
/// assert_eq!(Fixed.home_dir(), Some(PathBuf::from("/home/worker")));
/// ```
pub trait HomeDirectory: Send + Sync {
    /// Home directory of the current user, or `None` when the host cannot provide one
    fn home_dir(&self) -> Option<PathBuf>;
}
