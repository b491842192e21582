//! Resilient transport
//!
//! [`HttpExchange`] performs exactly one network round trip. The
//! [`ResilientTransport`] drives it under a [`RetryPolicy`] and hands the
//! final response to the decoder. Attempts are strictly sequential.

use crate::decoder::decode;
use crate::error::EnhanceError;
use crate::request::PreparedRequest;
use crate::retry::{classify, FailureKind, RetryDecision, RetryPolicy, RetryState, StopReason};
use async_trait::async_trait;
use bytes::Bytes;
use redlink_config::TimeoutConfig;
use redlink_core::AnnotationGraph;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::error::Error as StdError;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Network-level failure of one attempt
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    kind: FailureKind,
    message: String,
}

impl TransportError {
    /// Error of the given class
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Classify a reqwest error, dropping the URL so the key never leaks
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        let kind = classify(&err);
        let err = err.without_url();

        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        Self { kind, message }
    }

    /// Failure class
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Diagnostic message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Response of one successful round trip, body fully read
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Declared `Content-Type`, if any
    pub content_type: Option<String>,
    /// Response body
    pub body: Bytes,
}

/// One network round trip
#[async_trait]
pub trait HttpExchange: Send + Sync {
    /// Send the request once and read the whole response
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError>;
}

/// [`HttpExchange`] backed by a pooled reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestExchange {
    client: reqwest::Client,
}

impl ReqwestExchange {
    /// Build a client with per-attempt connect and request timeouts
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeouts.connect_timeout())
            .timeout(timeouts.request_timeout())
            .build()
            .map_err(TransportError::from_reqwest)?;
        Ok(Self { client })
    }

    /// Reuse an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpExchange for ReqwestExchange {
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone());

        if let Some(body) = request.body() {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(TransportError::from_reqwest)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(TransportError::from_reqwest)?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Retrying transport that yields decoded annotation graphs
#[derive(Debug, Clone)]
pub struct ResilientTransport<E = ReqwestExchange> {
    exchange: E,
    policy: RetryPolicy,
}

impl<E: HttpExchange> ResilientTransport<E> {
    /// Wrap an exchange with a retry policy
    pub fn new(exchange: E, policy: RetryPolicy) -> Self {
        Self { exchange, policy }
    }

    /// Retry policy in force
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Send the request, retrying per policy, and return the raw response
    ///
    /// Any HTTP response, including non-2xx, ends the loop.
    pub async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, EnhanceError> {
        let mut state = RetryState::new();

        loop {
            debug!(
                "sending {} {} (attempt {})",
                request.method(),
                request.redacted_url(),
                state.attempt_count() + 1
            );

            let error = match self.exchange.send(request).await {
                Ok(response) => {
                    if state.attempt_count() > 0 {
                        info!(
                            "request succeeded on attempt {}",
                            state.attempt_count() + 1
                        );
                    }
                    return Ok(response);
                }
                Err(error) => error,
            };

            let kind = error.kind();
            warn!("attempt {} failed: {}", state.attempt_count() + 1, error);
            state.record_failure(error);

            let decision = self
                .policy
                .decide(state.attempt_count(), kind, request.is_idempotent());

            match decision {
                RetryDecision::Retry => continue,
                RetryDecision::Stop(reason) => {
                    let attempts = state.attempt_count();
                    let last = state
                        .take_last_error()
                        .unwrap_or_else(|| TransportError::new(kind, "unknown failure"));
                    debug!("not retrying: {:?}", reason);
                    return Err(match reason {
                        StopReason::AttemptsExhausted => {
                            EnhanceError::RetriesExhausted { attempts, last }
                        }
                        StopReason::NonRetryable(_) | StopReason::NotIdempotent => {
                            EnhanceError::Transport {
                                attempts,
                                source: last,
                            }
                        }
                    });
                }
            }
        }
    }

    /// Send the request and decode the response into a graph
    pub async fn execute(&self, request: &PreparedRequest) -> Result<AnnotationGraph, EnhanceError> {
        let response = self.send(request).await?;
        decode(
            response.status,
            &response.body,
            response.content_type.as_deref(),
        )
    }
}
