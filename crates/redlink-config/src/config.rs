//! Engine configuration types
//!
//! [`RedlinkSettings`] is the raw, serde-friendly shape where every field is
//! optional. [`RedlinkConfig`] is the validated form handed to the engine.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Property holding the Redlink application name
pub const APP_PROPERTY: &str = "enhancer.engine.redlink.app";

/// Property holding the Redlink application key
pub const KEY_PROPERTY: &str = "enhancer.engine.redlink.key";

/// Property holding the Redlink API version
pub const VERSION_PROPERTY: &str = "enhancer.engine.redlink.version";

/// Property overriding the Redlink API endpoint
pub const ENDPOINT_PROPERTY: &str = "enhancer.engine.redlink.endpoint";

/// API version used when none is configured
pub const DEFAULT_VERSION: &str = "1.0";

/// Public Redlink API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.redlink.io";

/// Upper bound on attempts for one logical request
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

const REDACTED: &str = "<<configured>>";

/// Per-attempt I/O timeouts for the HTTP client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Maximum time to establish a connection
    pub connect_timeout_seconds: u64,
    /// Maximum time for one request/response exchange
    pub request_timeout_seconds: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: 10,
            request_timeout_seconds: 60,
        }
    }
}

impl TimeoutConfig {
    /// Connect timeout as a [`Duration`]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Retry bounds for the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts after which the transport gives up
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Raw engine settings, every field optional
///
/// Produced by the loaders in this crate and validated with
/// `RedlinkConfig::try_from`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedlinkSettings {
    /// Redlink application name
    pub app: Option<String>,
    /// Redlink application key
    pub key: Option<String>,
    /// API version
    pub version: Option<String>,
    /// API endpoint (scheme and host)
    pub endpoint: Option<String>,
    /// HTTP timeouts
    pub timeouts: TimeoutConfig,
    /// Retry bounds
    pub retry: RetryConfig,
}

impl fmt::Debug for RedlinkSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedlinkSettings")
            .field("app", &self.app.as_ref().map(|_| REDACTED))
            .field("key", &self.key.as_ref().map(|_| REDACTED))
            .field("version", &self.version)
            .field("endpoint", &self.endpoint)
            .field("timeouts", &self.timeouts)
            .field("retry", &self.retry)
            .finish()
    }
}

impl RedlinkSettings {
    /// Layer `other` on top of `self`
    ///
    /// Fields set in `other` win. Timeouts and retry bounds are taken from
    /// `other` only when they differ from their defaults.
    pub fn overlay(self, other: RedlinkSettings) -> Self {
        Self {
            app: other.app.or(self.app),
            key: other.key.or(self.key),
            version: other.version.or(self.version),
            endpoint: other.endpoint.or(self.endpoint),
            timeouts: if other.timeouts != TimeoutConfig::default() {
                other.timeouts
            } else {
                self.timeouts
            },
            retry: if other.retry != RetryConfig::default() {
                other.retry
            } else {
                self.retry
            },
        }
    }
}

/// Validated, immutable engine configuration
#[derive(Clone, PartialEq, Eq)]
pub struct RedlinkConfig {
    app_id: String,
    api_key: String,
    api_version: String,
    endpoint: String,
    timeouts: TimeoutConfig,
    retry: RetryConfig,
}

impl fmt::Debug for RedlinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedlinkConfig")
            .field("app_id", &REDACTED)
            .field("api_key", &REDACTED)
            .field("api_version", &self.api_version)
            .field("endpoint", &self.endpoint)
            .field("timeouts", &self.timeouts)
            .field("retry", &self.retry)
            .finish()
    }
}

impl RedlinkConfig {
    /// Create a configuration for the public endpoint and default version
    pub fn new(app_id: impl Into<String>, api_key: impl Into<String>) -> ConfigResult<Self> {
        Self::try_from(RedlinkSettings {
            app: Some(app_id.into()),
            key: Some(api_key.into()),
            ..Default::default()
        })
    }

    /// Replace the API version; blank values select [`DEFAULT_VERSION`]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = resolve_version(Some(version.into()));
        self
    }

    /// Point the engine at a different endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Replace the HTTP timeouts
    pub fn with_timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Redlink application name
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Redlink application key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// API version used in request paths
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// API endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// HTTP timeouts
    pub fn timeouts(&self) -> &TimeoutConfig {
        &self.timeouts
    }

    /// Retry bounds
    pub fn retry(&self) -> &RetryConfig {
        &self.retry
    }
}

impl TryFrom<RedlinkSettings> for RedlinkConfig {
    type Error = ConfigError;

    fn try_from(settings: RedlinkSettings) -> ConfigResult<Self> {
        let app_id = require(APP_PROPERTY, settings.app)?;
        let api_key = require(KEY_PROPERTY, settings.key)?;
        let api_version = resolve_version(settings.version);
        let endpoint = settings
            .endpoint
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        if settings.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                property: "retry.max_attempts",
                reason: "at least one attempt is required".to_string(),
            });
        }
        if settings.timeouts.connect_timeout_seconds == 0
            || settings.timeouts.request_timeout_seconds == 0
        {
            return Err(ConfigError::Invalid {
                property: "timeouts",
                reason: "timeouts must be greater than zero".to_string(),
            });
        }

        debug!(" - app: <<configured>>");
        debug!(" - key: <<configured>>");
        debug!(" - version: {}", api_version);

        Ok(Self {
            app_id,
            api_key,
            api_version,
            endpoint,
            timeouts: settings.timeouts,
            retry: settings.retry,
        })
    }
}

fn require(property: &'static str, value: Option<String>) -> ConfigResult<String> {
    match value {
        None => Err(ConfigError::MissingProperty { property }),
        Some(v) if v.trim().is_empty() => Err(ConfigError::EmptyProperty { property }),
        Some(v) => Ok(v),
    }
}

// A configured non-blank version always wins over the default.
fn resolve_version(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_VERSION.to_string())
}
