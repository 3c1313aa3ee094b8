//! Transport-level error types.

use thiserror::Error;

/// Error type for a single transport round trip.
///
/// Describes what went wrong on the wire. The request executor turns these
/// into structured errors; nothing here is retried.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and I/O failures while draining the response body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// Only produced when the transport itself was configured with a timeout.
    #[error("Request timed out")]
    Timeout,

    /// The transport refused the URL (e.g. an unsupported scheme).
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl HttpError {
    /// Status code used when this failure surfaces as a structured error.
    #[must_use]
    pub const fn status(&self) -> http::StatusCode {
        match self {
            Self::Connection(_) => http::StatusCode::BAD_GATEWAY,
            Self::Timeout => http::StatusCode::GATEWAY_TIMEOUT,
            Self::InvalidUrl(_) => http::StatusCode::BAD_REQUEST,
        }
    }
}
