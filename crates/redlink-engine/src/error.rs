//! Error types for the Redlink engine

use crate::transport::TransportError;
use redlink_config::ConfigError;
use redlink_core::BlobError;
use thiserror::Error;

/// Failure of a single enhancement request
#[derive(Debug, Error)]
pub enum EnhanceError {
    /// The request target could not be assembled
    #[error("unable to build request URI for Redlink service: {reason}")]
    UriConstruction {
        /// What was wrong with the target
        reason: String,
    },

    /// The content item has no blob to analyse
    #[error("content item has no blob")]
    MissingBlob,

    /// The blob could not be read
    #[error("unable to read content: {0}")]
    Content(#[from] BlobError),

    /// A network failure the retry policy does not retry
    #[error("request failed after {attempts} attempt(s): {source}")]
    Transport {
        /// Attempts made, including the failing one
        attempts: u32,
        /// Failure of the last attempt
        #[source]
        source: TransportError,
    },

    /// Network failures continued until the attempt cap
    #[error("giving up after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Attempts made
        attempts: u32,
        /// Failure of the last attempt
        #[source]
        last: TransportError,
    },

    /// The service answered with a status outside 2xx
    #[error("Redlink service answered with non-success status '{status_line}'")]
    NonSuccessStatus {
        /// Numeric status code
        status: u16,
        /// Status code and reason phrase
        status_line: String,
    },

    /// The response body is not a valid graph in the declared format
    #[error("unable to parse {format} response: {message}")]
    DecodeFailed {
        /// Format the body was parsed as
        format: String,
        /// Parser diagnostics
        message: String,
    },
}

impl EnhanceError {
    /// HTTP status of a [`EnhanceError::NonSuccessStatus`]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NonSuccessStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Attempts made before a transport failure surfaced
    pub fn attempts(&self) -> Option<u32> {
        match self {
            Self::Transport { attempts, .. } | Self::RetriesExhausted { attempts, .. } => {
                Some(*attempts)
            }
            _ => None,
        }
    }
}

/// Error returned by the engine for one content item
#[derive(Debug, Error)]
#[error("engine '{engine}' is unable to analyse content item <{content_item}>: {cause}")]
pub struct EngineError {
    engine: String,
    content_item: String,
    #[source]
    cause: EnhanceError,
}

impl EngineError {
    pub(crate) fn new(engine: &str, content_item: &str, cause: EnhanceError) -> Self {
        Self {
            engine: engine.to_string(),
            content_item: content_item.to_string(),
            cause,
        }
    }

    /// Name of the engine that failed
    pub fn engine(&self) -> &str {
        &self.engine
    }

    /// URI of the content item that could not be enhanced
    pub fn content_item(&self) -> &str {
        &self.content_item
    }

    /// Underlying failure
    pub fn cause(&self) -> &EnhanceError {
        &self.cause
    }

    /// Take the underlying failure
    pub fn into_cause(self) -> EnhanceError {
        self.cause
    }
}

/// Failure while bringing up an engine
#[derive(Debug, Error)]
pub enum ActivationError {
    /// Required configuration is missing or invalid
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be created
    #[error("unable to create HTTP client: {0}")]
    Client(#[source] TransportError),
}
