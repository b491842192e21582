//! Retry policy
//!
//! A failed attempt is classified into a [`FailureKind`]. The policy then
//! decides whether the same request is sent again:
//!
//! 1. stop once the attempt cap is reached
//! 2. stop on timeouts, unresolvable hosts, connect timeouts and TLS failures
//! 3. otherwise retry only idempotent (bodyless) requests
//!
//! Retries are immediate; there is no backoff.

use crate::transport::TransportError;
use redlink_config::DEFAULT_MAX_ATTEMPTS;
use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Classification of a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Request did not complete within its deadline
    Timeout,
    /// Host name could not be resolved
    HostUnresolved,
    /// Connection could not be established within its deadline
    ConnectTimeout,
    /// TLS handshake or certificate validation failed
    TlsFailure,
    /// Any other I/O failure
    Other,
}

impl FailureKind {
    /// Failures that imply the peer is unreachable or untrusted
    pub fn is_fatal(self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Timeout => "timeout",
            Self::HostUnresolved => "unknown host",
            Self::ConnectTimeout => "connect timeout",
            Self::TlsFailure => "TLS failure",
            Self::Other => "I/O error",
        };
        f.write_str(label)
    }
}

/// Classify a reqwest error
pub fn classify(err: &reqwest::Error) -> FailureKind {
    classify_chain(err.is_timeout(), err.is_connect(), err.source())
}

/// Classify from the transport flags and the chain of underlying causes
///
/// The top-level reqwest error is not part of `cause` because its message
/// embeds the request URL.
pub fn classify_chain(
    is_timeout: bool,
    is_connect: bool,
    cause: Option<&(dyn StdError + 'static)>,
) -> FailureKind {
    if is_timeout {
        return if is_connect {
            FailureKind::ConnectTimeout
        } else {
            FailureKind::Timeout
        };
    }

    let mut current = cause;
    while let Some(err) = current {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::TimedOut {
                return if is_connect {
                    FailureKind::ConnectTimeout
                } else {
                    FailureKind::Timeout
                };
            }
        }

        if is_rustls_error(err) {
            return FailureKind::TlsFailure;
        }

        let message = err.to_string().to_ascii_lowercase();
        if is_resolution_failure(&message) {
            return FailureKind::HostUnresolved;
        }
        if is_tls_failure(&message) {
            return FailureKind::TlsFailure;
        }

        current = err.source();
    }

    FailureKind::Other
}

fn is_resolution_failure(message: &str) -> bool {
    [
        "dns error",
        "failed to lookup address",
        "name or service not known",
        "no such host",
        "nodename nor servname",
    ]
    .iter()
    .any(|needle| message.contains(needle))
}

/// A `rustls::Error` either directly in the chain or wrapped in an `io::Error`
fn is_rustls_error(err: &(dyn StdError + 'static)) -> bool {
    if err.is::<rustls::Error>() {
        return true;
    }
    err.downcast_ref::<io::Error>()
        .and_then(|io_err| io_err.get_ref())
        .is_some_and(|inner| inner.is::<rustls::Error>())
}

// Fallback for TLS stacks that only surface a message
fn is_tls_failure(message: &str) -> bool {
    [
        "invalid peer certificate",
        "certificate verify failed",
        "tls handshake",
        "handshake failure",
    ]
    .iter()
    .any(|needle| message.contains(needle))
}

/// Why the transport stopped retrying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The attempt cap was reached
    AttemptsExhausted,
    /// The failure class is never retried
    NonRetryable(FailureKind),
    /// The request encloses a body
    NotIdempotent,
}

/// Outcome of evaluating the policy after a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Send the same request again
    Retry,
    /// Surface the failure
    Stop(StopReason),
}

/// Bounded, idempotency-aware retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl RetryPolicy {
    /// Policy allowing at most `max_attempts` attempts (minimum 1)
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Attempt cap
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Decide after `attempts` failed attempts, the last one of class `kind`
    pub fn decide(&self, attempts: u32, kind: FailureKind, idempotent: bool) -> RetryDecision {
        if attempts >= self.max_attempts {
            RetryDecision::Stop(StopReason::AttemptsExhausted)
        } else if kind.is_fatal() {
            RetryDecision::Stop(StopReason::NonRetryable(kind))
        } else if !idempotent {
            RetryDecision::Stop(StopReason::NotIdempotent)
        } else {
            RetryDecision::Retry
        }
    }
}

/// Progress of one logical request
#[derive(Debug, Default)]
pub struct RetryState {
    attempt_count: u32,
    last_error: Option<TransportError>,
}

impl RetryState {
    /// Fresh state before the first attempt
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts that have failed so far
    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    /// Failure of the most recent attempt
    pub fn last_error(&self) -> Option<&TransportError> {
        self.last_error.as_ref()
    }

    /// Record one failed attempt
    pub fn record_failure(&mut self, error: TransportError) {
        self.attempt_count += 1;
        self.last_error = Some(error);
    }

    /// Take the last failure, leaving the state empty
    pub fn take_last_error(&mut self) -> Option<TransportError> {
        self.last_error.take()
    }
}
