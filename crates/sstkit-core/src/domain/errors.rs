//! Domain error types
//!
//! This module defines error types specific to SDK operations, including
//! configuration failures, value capture failures, and network failures.
//! None of these ever cross the `track_event` boundary to the host
//! application; they are logged, self-reported, or surfaced through the
//! result-returning API variants.

use thiserror::Error;

/// Errors that can occur in SDK operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SstError {
    /// Invalid configuration (bad collection domain, empty account name)
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A value captured at the API boundary could not be represented as JSON
    #[error("Value for key '{key}' is not serializable: {detail}")]
    Serialization {
        /// The event-data or data-layer key carrying the offending value
        key: String,
        /// The serializer's own message
        detail: String,
    },

    /// Outbound request failed (DNS, TLS, connect, or non-success status)
    #[error("Request to {url} failed: {detail}")]
    Network {
        /// The URL the request was addressed to
        url: String,
        /// Transport or status description
        detail: String,
    },

    /// A model's `evaluate` returned an error or timed out
    #[error("Model '{key}' failed to evaluate: {detail}")]
    ModelEvaluation {
        /// The model key whose payload slot is omitted
        key: String,
        /// The underlying evaluation failure
        detail: String,
    },

    /// Two models with the same key were supplied to `Models::new`
    #[error("Duplicate model key: {0}")]
    DuplicateModel(String),
}
