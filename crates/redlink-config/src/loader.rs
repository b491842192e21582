//! Settings sources: property maps, environment and TOML files

use crate::config::{
    RedlinkSettings, APP_PROPERTY, ENDPOINT_PROPERTY, KEY_PROPERTY, VERSION_PROPERTY,
};
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use tracing::{debug, trace};

/// Environment variable holding the application name
pub const APP_ENV: &str = "REDLINK_APP";

/// Environment variable holding the application key
pub const KEY_ENV: &str = "REDLINK_KEY";

/// Environment variable holding the API version
pub const VERSION_ENV: &str = "REDLINK_VERSION";

/// Environment variable overriding the endpoint
pub const ENDPOINT_ENV: &str = "REDLINK_ENDPOINT";

impl RedlinkSettings {
    /// Read settings from a component property map
    ///
    /// Recognised keys are [`APP_PROPERTY`], [`KEY_PROPERTY`],
    /// [`VERSION_PROPERTY`] and [`ENDPOINT_PROPERTY`]; everything else is
    /// ignored.
    pub fn from_properties<I, K, V>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut settings = Self::default();
        for (key, value) in properties {
            let value = value.as_ref().to_string();
            match key.as_ref() {
                APP_PROPERTY => settings.app = Some(value),
                KEY_PROPERTY => settings.key = Some(value),
                VERSION_PROPERTY => settings.version = Some(value),
                ENDPOINT_PROPERTY => settings.endpoint = Some(value),
                other => trace!("ignoring property {}", other),
            }
        }
        settings
    }

    /// Read settings from `REDLINK_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            app: lookup(APP_ENV),
            key: lookup(KEY_ENV),
            version: lookup(VERSION_ENV),
            endpoint: lookup(ENDPOINT_ENV),
            ..Default::default()
        }
    }

    /// Parse settings from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load settings from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!("loading Redlink settings from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
