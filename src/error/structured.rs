//! The structured error value and its rendering policy.

use std::fmt;
use std::str::FromStr;

use http::StatusCode;
use thiserror::Error;

/// Boxed underlying cause carried by an [`Error`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failure carrying a human-readable message, a numeric code and an
/// optional underlying cause.
///
/// The code is conventionally an HTTP status code. The same value is used for
/// both propagation modes: returned as the `Err` side of a `Result`, or raised
/// with [`raise`](super::raise) and recovered at the handler boundary.
///
/// `Display` always produces the short form `ERROR (<code>): <message>`, which
/// is safe to show to clients. The cause only appears in [`Error::detailed`]
/// and [`Error::render`], which are meant for logs.
///
/// Values are never mutated after construction.
#[derive(Debug, Error)]
#[error("ERROR ({code}): {message}")]
pub struct Error {
    message: String,
    code: u16,
    #[source]
    cause: Option<BoxError>,
}

impl Error {
    /// Creates an error without an underlying cause.
    ///
    /// An empty or whitespace-only message is replaced with the canonical
    /// reason phrase for `code` (or `"Unknown error"`).
    #[must_use]
    pub fn new(message: impl Into<String>, code: u16) -> Self {
        Self {
            message: non_empty_message(message.into(), code),
            code,
            cause: None,
        }
    }

    /// Creates an error wrapping an underlying cause.
    ///
    /// The error takes exclusive ownership of the cause.
    #[must_use]
    pub fn with_cause(message: impl Into<String>, code: u16, cause: impl Into<BoxError>) -> Self {
        Self {
            message: non_empty_message(message.into(), code),
            code,
            cause: Some(cause.into()),
        }
    }

    /// Creates an error from a typed HTTP status.
    #[must_use]
    pub fn from_status(message: impl Into<String>, status: StatusCode) -> Self {
        Self::new(message, status.as_u16())
    }

    /// The client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The numeric classification code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.code
    }

    /// The wrapped cause, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// The HTTP status matching `code`.
    ///
    /// Codes outside the valid status range map to `500 Internal Server Error`.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Extended rendering including the wrapped cause.
    ///
    /// Identical to `Display` when there is no cause.
    #[must_use]
    pub fn detailed(&self) -> String {
        match &self.cause {
            Some(cause) => format!("{self}; inner error: {cause}"),
            None => self.to_string(),
        }
    }

    /// Renders the error for diagnostic logging.
    ///
    /// [`RenderMode::Standard`] yields [`Error::detailed`]; [`RenderMode::Debug`]
    /// additionally walks the cause's own source chain.
    #[must_use]
    pub fn render(&self, mode: RenderMode) -> String {
        let mut out = self.detailed();
        if mode == RenderMode::Debug {
            let mut next = self.cause.as_ref().and_then(|c| c.source());
            while let Some(source) = next {
                out.push_str("; caused by: ");
                out.push_str(&source.to_string());
                next = source.source();
            }
        }
        out
    }
}

fn non_empty_message(message: String, code: u16) -> String {
    if !message.trim().is_empty() {
        return message;
    }
    StatusCode::from_u16(code)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown error")
        .to_string()
}

/// How much detail error renderings carry in the log stream.
///
/// Never affects what is sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Message, code and the direct cause.
    #[default]
    Standard,
    /// Everything in `Standard` plus the full cause chain.
    Debug,
}

impl RenderMode {
    /// Name accepted by [`RenderMode::from_str`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = String;

    /// Parses `standard` or `debug`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "debug" => Ok(Self::Debug),
            other => Err(format!("expected 'standard' or 'debug', got '{other}'")),
        }
    }
}
