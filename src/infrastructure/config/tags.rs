//! Special-tag expansion
//!
//! Rewrites placeholder tokens in a fixed set of string fields into values
//! resolved from the host. Only the emulator storage path is expanded.

use std::path::PathBuf;

use tracing::debug;

use crate::domain::error::ExpandError;
use crate::domain::models::Config;
use crate::domain::ports::HomeDirectory;

/// Placeholder replaced with the current user's home directory
pub const USER_HOME_TAG: &str = "{user}";

/// Home directory lookup backed by the host environment
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHome;

impl HomeDirectory for SystemHome {
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

/// Home directory pinned to a fixed path, or to no path at all
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedHome(Option<PathBuf>);

impl FixedHome {
    /// A lookup that always returns `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(Some(path.into()))
    }

    /// A lookup that always fails
    pub const fn unavailable() -> Self {
        Self(None)
    }
}

impl HomeDirectory for FixedHome {
    fn home_dir(&self) -> Option<PathBuf> {
        self.0.clone()
    }
}

fn expandable_fields(config: &mut Config) -> [(&'static str, &mut String); 1] {
    [("emulator.storage", &mut config.emulator.storage)]
}

/// Replace every `{user}` tag in the expandable fields with the home directory.
///
/// The home directory is looked up at most once and only when a tag is
/// present. Running this on an already expanded config changes nothing.
pub fn expand_special_tags(
    config: &mut Config,
    home: &dyn HomeDirectory,
) -> Result<(), ExpandError> {
    let mut home_dir: Option<String> = None;

    for (field, value) in expandable_fields(config) {
        if value.is_empty() || !value.contains(USER_HOME_TAG) {
            continue;
        }

        if home_dir.is_none() {
            home_dir = Some(lookup_home(home, field)?);
        }
        let replacement = home_dir.as_deref().unwrap_or_default();

        *value = value.replace(USER_HOME_TAG, replacement);
        debug!(field, value = %value, "expanded user home tag");
    }

    Ok(())
}

fn lookup_home(home: &dyn HomeDirectory, field: &'static str) -> Result<String, ExpandError> {
    home.home_dir()
        .ok_or(ExpandError::HomeUnavailable {
            field,
            tag: USER_HOME_TAG,
        })?
        .into_os_string()
        .into_string()
        .map_err(|raw| ExpandError::NonUtf8Home(PathBuf::from(raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn with_storage(storage: &str) -> Config {
        let mut config = Config::default();
        config.emulator.storage = storage.to_string();
        config
    }

    #[test]
    fn test_expands_user_tag() {
        let mut config = with_storage("{user}/.cr/save");
        expand_special_tags(&mut config, &FixedHome::new("/home/gamer")).unwrap();
        assert_eq!(config.emulator.storage, "/home/gamer/.cr/save");
    }

    #[test]
    fn test_expands_every_occurrence() {
        let mut config = with_storage("{user}/a:{user}/b");
        expand_special_tags(&mut config, &FixedHome::new("/h")).unwrap();
        assert_eq!(config.emulator.storage, "/h/a:/h/b");
    }

    #[test]
    fn test_empty_storage_is_noop_even_without_home() {
        let mut config = Config::default();
        expand_special_tags(&mut config, &FixedHome::unavailable()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_untagged_storage_skips_home_lookup() {
        let mut config = with_storage("/var/lib/worker");
        expand_special_tags(&mut config, &FixedHome::unavailable()).unwrap();
        assert_eq!(config.emulator.storage, "/var/lib/worker");
    }

    #[test]
    fn test_missing_home_is_an_error() {
        let mut config = with_storage("{user}/roms");
        let err = expand_special_tags(&mut config, &FixedHome::unavailable()).unwrap_err();
        assert_eq!(
            err,
            ExpandError::HomeUnavailable {
                field: "emulator.storage",
                tag: USER_HOME_TAG,
            }
        );
        assert_eq!(config.emulator.storage, "{user}/roms", "field is left untouched");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_home_is_an_error() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let raw = PathBuf::from(OsString::from_vec(vec![b'/', 0xff]));
        let mut config = with_storage("{user}/roms");

        let err = expand_special_tags(&mut config, &FixedHome::new(raw.clone())).unwrap_err();

        assert_eq!(err, ExpandError::NonUtf8Home(raw));
        assert_eq!(config.emulator.storage, "{user}/roms");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_home_is_ignored_without_tag() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let home = FixedHome::new(OsString::from_vec(vec![0xff]));
        let mut config = with_storage("/var/lib/worker");

        expand_special_tags(&mut config, &home).unwrap();
        assert_eq!(config.emulator.storage, "/var/lib/worker");
    }

    #[test]
    fn test_other_string_fields_are_untouched() {
        let mut config = with_storage("{user}/roms");
        config.worker.network.zone = "{user}".to_string();
        config.emulator.libretro.cores.paths.libs = "{user}/cores".to_string();

        expand_special_tags(&mut config, &FixedHome::new("/home/gamer")).unwrap();

        assert_eq!(config.emulator.storage, "/home/gamer/roms");
        assert_eq!(config.worker.network.zone, "{user}");
        assert_eq!(config.emulator.libretro.cores.paths.libs, "{user}/cores");
    }

    #[test]
    fn test_expansion_never_marks_loaded() {
        let mut config = with_storage("{user}");
        expand_special_tags(&mut config, &FixedHome::new("/h")).unwrap();
        assert!(!config.loaded);
    }

    #[test]
    fn test_system_home_follows_home_env() {
        temp_env::with_var("HOME", Some("/tmp/worker-home"), || {
            let mut config = with_storage("{user}/roms");
            expand_special_tags(&mut config, &SystemHome).unwrap();
            assert_eq!(config.emulator.storage, "/tmp/worker-home/roms");
        });
    }

    proptest! {
        #[test]
        fn prop_untagged_storage_is_unchanged(storage in "[^{}]*") {
            let mut config = with_storage(&storage);
            expand_special_tags(&mut config, &FixedHome::new("/home/gamer")).unwrap();
            prop_assert_eq!(config.emulator.storage, storage);
        }

        #[test]
        fn prop_tag_is_replaced_and_idempotent(
            prefix in "[a-z/._-]{0,16}",
            suffix in "[a-z/._-]{0,16}",
            home in "/[a-z]{1,12}",
        ) {
            let home_dir = FixedHome::new(home.clone());
            let mut config = with_storage(&format!("{prefix}{USER_HOME_TAG}{suffix}"));

            expand_special_tags(&mut config, &home_dir).unwrap();
            prop_assert_eq!(&config.emulator.storage, &format!("{prefix}{home}{suffix}"));

            let once = config.clone();
            expand_special_tags(&mut config, &home_dir).unwrap();
            prop_assert_eq!(config, once);
        }
    }
}
