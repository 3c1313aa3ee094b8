//! The request executor: base-URL resolution, header policy and error mapping.

use http::header::{ACCEPT, CONTENT_TYPE, HeaderName, HeaderValue, USER_AGENT};
use http::{Method, StatusCode};
use url::Url;

use super::{HttpClient, HttpRequest, HttpResponse, ReqwestClient};
use crate::error::Error;

/// The four verbs exposed by a webhook client.
///
/// Implemented by [`Client`]; depend on this trait when a caller only needs
/// to issue requests and should be testable with a stand-in.
pub trait Api: Send + Sync {
    /// Sends a PUT request with `body`.
    fn put(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<HttpResponse, Error>> + Send;

    /// Sends a POST request with `body`.
    fn post(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<HttpResponse, Error>> + Send;

    /// Sends a GET request without a body.
    fn get(&self, path: &str)
    -> impl std::future::Future<Output = Result<HttpResponse, Error>> + Send;

    /// Sends a DELETE request without a body.
    fn delete(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<HttpResponse, Error>> + Send;
}

/// Executes HTTP requests against a fixed base URL.
///
/// Configuration is read-only while requests run, so one instance can be
/// shared (e.g. behind an `Arc`) by any number of concurrent callers.
/// There is no internal timeout; bound latency on the transport instead
/// (see [`ReqwestClient::with_timeout`]).
///
/// Header fields left empty (or containing only whitespace) are not sent.
///
/// # Example
///
/// ```no_run
/// use hookkit::client::{Api, Client};
///
/// # async fn example() -> Result<(), hookkit::error::Error> {
/// let client = Client::new("https://hooks.example.com/api/")?
///     .with_content_type("application/json")
///     .with_user_agent("my-service/1.0");
///
/// let response = client.post("events", br#"{"hello":"world"}"#.to_vec()).await?;
/// println!("{} {:?}", response.status, response.body_text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client<C = ReqwestClient> {
    base_url: Url,
    transport: C,
    content_type: String,
    accept: String,
    user_agent: String,
}

impl Client<ReqwestClient> {
    /// Creates an executor using the default reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns a configuration error (code 500) if `base_url` is empty,
    /// whitespace-only, not a valid absolute URL, or cannot serve as a base.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_transport(ReqwestClient::default(), base_url)
    }

    /// Checks `base_url` the way construction does, without building a client.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Client::new`].
    pub fn validate_base_url(base_url: &str) -> Result<Url, Error> {
        parse_base_url(base_url)
    }
}

impl<C: HttpClient> Client<C> {
    /// Creates an executor on top of the given transport.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Client::new`].
    pub fn with_transport(transport: C, base_url: &str) -> Result<Self, Error> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self {
            base_url,
            transport,
            content_type: String::new(),
            accept: String::new(),
            user_agent: String::new(),
        })
    }

    /// The base URL every path is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &C {
        &self.transport
    }

    /// Sets the request `Content-Type` (sent only with a non-empty body).
    #[must_use]
    pub fn with_content_type(mut self, value: impl Into<String>) -> Self {
        self.content_type = value.into();
        self
    }

    /// Sets the `Accept` header value.
    #[must_use]
    pub fn with_accept(mut self, value: impl Into<String>) -> Self {
        self.accept = value.into();
        self
    }

    /// Sets the `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, value: impl Into<String>) -> Self {
        self.user_agent = value.into();
        self
    }

    /// Replaces the `Content-Type`; an empty value disables the header.
    pub fn set_content_type(&mut self, value: impl Into<String>) {
        self.content_type = value.into();
    }

    /// Replaces the `Accept` value; an empty value disables the header.
    pub fn set_accept(&mut self, value: impl Into<String>) {
        self.accept = value.into();
    }

    /// Replaces the `User-Agent` value; an empty value disables the header.
    pub fn set_user_agent(&mut self, value: impl Into<String>) {
        self.user_agent = value.into();
    }

    /// Resolves `path` against the base URL.
    ///
    /// Follows RFC 3986 reference resolution: a relative path is resolved
    /// against the base, an absolute URL replaces it entirely.
    ///
    /// # Errors
    ///
    /// Returns a 400 error carrying the parse failure.
    pub fn resolve(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(|e| {
            Error::with_cause(
                format!("cannot resolve '{path}' against {}", self.base_url),
                StatusCode::BAD_REQUEST.as_u16(),
                e,
            )
        })
    }

    /// Performs one request and returns the response with its body fully read.
    ///
    /// An empty `method` means GET. An empty body is treated as no body.
    ///
    /// # Errors
    ///
    /// Every failure returns an [`Error`] and no partial response:
    /// - unresolvable `path`, illegal method token or illegal header value (400)
    /// - connection failures, including while draining the body (502)
    /// - transport timeouts (504)
    /// - URLs rejected by the transport, such as unsupported schemes (400)
    pub async fn execute(
        &self,
        path: &str,
        method: &str,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, Error> {
        let request = self.build_request(path, method, body)?;
        let method = request.method.clone();
        let url = request.url.clone();

        tracing::debug!(
            "{method} {url} request headers={:?} body_len={}",
            request.headers,
            request.body_len()
        );

        let response = self.transport.request(request).await.map_err(|e| {
            tracing::error!("HTTP {method} {url} invocation failed: {e}");
            Error::with_cause(
                format!("{method} {url} failed"),
                e.status().as_u16(),
                e,
            )
        })?;

        tracing::debug!(
            "{method} {url} response status={} headers={:?}",
            response.status,
            response.headers
        );
        tracing::debug!(
            "{method} {url} response body: {}",
            String::from_utf8_lossy(&response.body)
        );

        Ok(response)
    }

    fn build_request(
        &self,
        path: &str,
        method: &str,
        body: Option<Vec<u8>>,
    ) -> Result<HttpRequest, Error> {
        let url = self.resolve(path)?;
        let method = parse_method(method)?;
        let mut request = HttpRequest::new(method, url);

        if let Some(body) = body.filter(|b| !b.is_empty()) {
            request = request.with_body(body);
            if let Some(value) = header_value(CONTENT_TYPE, &self.content_type)? {
                request = request.with_header(CONTENT_TYPE, value);
            }
        }
        if let Some(value) = header_value(ACCEPT, &self.accept)? {
            request = request.with_header(ACCEPT, value);
        }
        if let Some(value) = header_value(USER_AGENT, &self.user_agent)? {
            request = request.with_header(USER_AGENT, value);
        }

        Ok(request)
    }
}

impl<C: HttpClient> Api for Client<C> {
    async fn put(&self, path: &str, body: Vec<u8>) -> Result<HttpResponse, Error> {
        self.execute(path, "PUT", Some(body)).await
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> Result<HttpResponse, Error> {
        self.execute(path, "POST", Some(body)).await
    }

    async fn get(&self, path: &str) -> Result<HttpResponse, Error> {
        self.execute(path, "GET", None).await
    }

    async fn delete(&self, path: &str) -> Result<HttpResponse, Error> {
        self.execute(path, "DELETE", None).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url, Error> {
    let config_error = StatusCode::INTERNAL_SERVER_ERROR.as_u16();
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::new("base URL cannot be an empty string", config_error));
    }

    let url = Url::parse(raw)
        .map_err(|e| Error::with_cause(format!("invalid base URL '{raw}'"), config_error, e))?;
    if url.cannot_be_a_base() {
        return Err(Error::new(
            format!("base URL '{raw}' cannot be used to resolve paths"),
            config_error,
        ));
    }

    Ok(url)
}

fn parse_method(method: &str) -> Result<Method, Error> {
    if method.is_empty() {
        return Ok(Method::GET);
    }
    Method::from_bytes(method.as_bytes()).map_err(|e| {
        Error::with_cause(
            format!("invalid HTTP method '{method}'"),
            StatusCode::BAD_REQUEST.as_u16(),
            e,
        )
    })
}

fn header_value(name: HeaderName, raw: &str) -> Result<Option<HeaderValue>, Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    HeaderValue::from_str(trimmed).map(Some).map_err(|e| {
        Error::with_cause(
            format!("invalid {name} header value"),
            StatusCode::BAD_REQUEST.as_u16(),
            e,
        )
    })
}
