//! Error types of the configuration pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Why a configuration file did not contribute to the resolved configuration.
///
/// All of these are soft failures: resolution continues with the zero
/// configuration and reports the reason alongside it.
#[derive(Error, Debug)]
pub enum SourceError {
    /// No path was given, or the path was empty
    #[error("No configuration file path given")]
    NoPath,

    /// Nothing exists at the given path
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read
    #[error("Failed to read configuration file {}: {source}", path.display())]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid configuration document
    #[error("Failed to parse configuration file {}: {source}", path.display())]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Parser diagnostic
        #[source]
        source: Box<figment::Error>,
    },
}

/// Failure to substitute a special tag with its runtime value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    /// The home directory lookup returned nothing
    #[error("Couldn't read user home directory to expand {tag} in {field}")]
    HomeUnavailable {
        /// Dotted path of the field holding the tag
        field: &'static str,
        /// Tag that could not be expanded
        tag: &'static str,
    },

    /// The home directory cannot be spliced into a string field
    #[error("User home directory is not valid UTF-8: {}", .0.display())]
    NonUtf8Home(PathBuf),
}

/// Wire decoding errors
#[derive(Error, Debug)]
pub enum CodecError {
    /// The payload is not a JSON configuration object
    #[error("Malformed configuration payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The payload was accepted but a tag could not be expanded
    #[error(transparent)]
    Expand(#[from] ExpandError),
}

/// Command-line flag errors
#[derive(Error, Debug)]
pub enum FlagError {
    /// Unknown flag, bad value, or a `--help`/`--version` request
    #[error(transparent)]
    Invalid(#[from] clap::Error),

    /// The file named by `--conf` left a tag that could not be expanded
    #[error(transparent)]
    Expand(#[from] ExpandError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_messages_name_the_path() {
        let err = SourceError::NotFound(PathBuf::from("/etc/worker/config.yaml"));
        assert_eq!(
            err.to_string(),
            "Configuration file not found: /etc/worker/config.yaml"
        );

        let err = SourceError::Read {
            path: PathBuf::from("config.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("config.yaml"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_expand_error_message() {
        let err = ExpandError::HomeUnavailable {
            field: "emulator.storage",
            tag: "{user}",
        };
        assert_eq!(
            err.to_string(),
            "Couldn't read user home directory to expand {user} in emulator.storage"
        );
    }

    #[test]
    fn test_codec_error_wraps_expand_error_transparently() {
        let inner = ExpandError::HomeUnavailable {
            field: "emulator.storage",
            tag: "{user}",
        };
        let err = CodecError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }
}
