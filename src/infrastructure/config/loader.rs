//! Layered file resolution of the worker configuration

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use figment::providers::{Format, Serialized, Yaml};
use figment::Figment;
use tracing::{debug, info, warn};

use super::tags::{expand_special_tags, SystemHome};
use crate::domain::error::{ExpandError, SourceError};
use crate::domain::models::Config;
use crate::domain::ports::HomeDirectory;

/// Outcome of resolving a configuration from an optional file.
#[derive(Debug)]
pub struct Resolved {
    /// Resolved configuration, tags already expanded
    pub config: Config,

    /// File the configuration was loaded from, or why none was used
    pub source: Result<PathBuf, SourceError>,
}

impl Resolved {
    /// Whether the configuration was populated from the file
    pub const fn is_loaded(&self) -> bool {
        self.config.loaded
    }

    /// Split into the configuration and its loaded flag
    pub fn into_parts(self) -> (Config, bool) {
        let loaded = self.config.loaded;
        (self.config, loaded)
    }
}

/// Configuration loader layering a YAML file over zero defaults
pub struct ConfigLoader;

impl ConfigLoader {
    /// Zero-valued configuration for callers that skip file resolution
    pub fn empty() -> Config {
        Config::empty()
    }

    /// Resolve configuration from `path`, expanding tags against the host home directory.
    ///
    /// File problems never fail resolution: the zero configuration is used and
    /// the reason is reported in [`Resolved::source`]. Only an unresolvable
    /// `{user}` tag is an error.
    pub fn resolve(path: Option<&Path>) -> Result<Resolved, ExpandError> {
        Self::resolve_with_home(path, &SystemHome)
    }

    /// Resolve configuration from `path` using the given home directory lookup
    pub fn resolve_with_home(
        path: Option<&Path>,
        home: &dyn HomeDirectory,
    ) -> Result<Resolved, ExpandError> {
        let (mut config, source) = match Self::load_from_file(path) {
            Ok((config, path)) => {
                info!(path = %path.display(), "configuration loaded");
                (config, Ok(path))
            }
            Err(SourceError::NoPath) => {
                debug!("no configuration file given, using defaults");
                (Config::empty(), Err(SourceError::NoPath))
            }
            Err(reason) => {
                warn!(%reason, "falling back to default configuration");
                (Config::empty(), Err(reason))
            }
        };

        expand_special_tags(&mut config, home)?;

        Ok(Resolved { config, source })
    }

    /// Load and parse the file at `path` into a loaded configuration.
    ///
    /// Tags are not expanded.
    pub fn load_from_file(path: Option<&Path>) -> Result<(Config, PathBuf), SourceError> {
        let path = match path {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => return Err(SourceError::NoPath),
        };

        let contents = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                SourceError::NotFound(path.to_path_buf())
            } else {
                SourceError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let mut config = Self::parse(&contents).map_err(|source| SourceError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;
        config.loaded = true;

        Ok((config, path.to_path_buf()))
    }

    fn parse(contents: &str) -> Result<Config, figment::Error> {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::string(contents))
            .extract()
    }
}
