//! Wire-level request and response values, and the transport trait.

use std::future::Future;

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use url::Url;

use super::HttpError;

/// A fully resolved outgoing request.
///
/// Built by the executor once the path has been resolved and the header
/// policy applied; transports send it as-is.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request method
    pub method: Method,
    /// Absolute target URL
    pub url: Url,
    /// Headers to send
    pub headers: HeaderMap,
    /// Body bytes; `None` sends no body at all
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// A request with no headers and no body.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Attaches `body`.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a header, replacing any previous value for the same name.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Number of body bytes that will be sent.
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.as_ref().map_or(0, Vec::len)
    }
}

/// A response whose body has been read to the end.
///
/// By the time a value exists the connection has been handed back to the
/// transport, so holding one never pins network resources.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status sent by the server
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Complete body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Assembles a response from its parts.
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body as UTF-8, or `None` if it is not valid UTF-8.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// The `Content-Type` header, if present and printable.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

/// Sends one [`HttpRequest`] and buffers the whole response.
///
/// The executor is generic over this trait so tests can substitute recording
/// or failing transports and callers can bring a preconfigured HTTP stack.
/// Implementations are shared between concurrent callers.
///
/// # Example
///
/// ```ignore
/// use hookkit::client::{HttpClient, HttpError, HttpRequest, HttpResponse};
///
/// struct Canned(HttpResponse);
///
/// impl HttpClient for Canned {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Performs the round trip.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Connection`] when the connection fails or the body cannot be drained
    /// - [`HttpError::Timeout`] when the transport's own deadline expires
    /// - [`HttpError::InvalidUrl`] when the transport rejects the URL
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}
