//! Configuration errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required property was not supplied at all
    #[error("missing required property '{property}'")]
    MissingProperty {
        /// Name of the missing property
        property: &'static str,
    },

    /// A required property was supplied but is blank
    #[error("required property '{property}' must not be empty")]
    EmptyProperty {
        /// Name of the empty property
        property: &'static str,
    },

    /// A property holds a value outside its permitted range
    #[error("invalid value for property '{property}': {reason}")]
    Invalid {
        /// Name of the offending property
        property: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Config file could not be read
    #[error("unable to read config file {path}: {source}")]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the settings schema
    #[error("unable to parse config file {path}: {source}")]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Name of the property this error refers to, if any
    pub fn property(&self) -> Option<&'static str> {
        match self {
            Self::MissingProperty { property }
            | Self::EmptyProperty { property }
            | Self::Invalid { property, .. } => Some(property),
            Self::Io { .. } | Self::Parse { .. } => None,
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
