//! Recovery of raised errors at the handler boundary.

use std::any::Any;

use axum::body::Body;
use axum::response::{IntoResponse, Response};
use http::header::{CONTENT_TYPE, HeaderValue, X_CONTENT_TYPE_OPTIONS};
use http::StatusCode;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use crate::error::{Error, RenderMode};

/// Body sent when a handler panics with anything other than an [`Error`].
pub const INTERNAL_ERROR_BODY: &str = "Internal Error";

/// Writes the error as a plain-text response: `message` as body, `code` as status.
///
/// The cause is never written.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        plain_text(self.status(), self.message().to_owned())
    }
}

/// Panic handler for [`CatchPanicLayer`] that understands raised [`Error`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecoverPanic {
    mode: RenderMode,
}

impl RecoverPanic {
    /// Creates a handler that logs recovered errors with `mode`.
    #[must_use]
    pub const fn new(mode: RenderMode) -> Self {
        Self { mode }
    }
}

impl ResponseForPanic for RecoverPanic {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Body> {
        recover(err, self.mode)
    }
}

/// Layer that catches handler panics and answers with exactly one response.
///
/// Raised [`Error`]s become their own status and message; any other panic
/// becomes `500 Internal Error`. Nothing is re-raised.
#[must_use]
pub fn recovery_layer(mode: RenderMode) -> CatchPanicLayer<RecoverPanic> {
    CatchPanicLayer::custom(RecoverPanic::new(mode))
}

/// Converts a panic payload into the response the client receives.
///
/// The full rendering goes to the log; the client only ever sees the
/// error's message (or [`INTERNAL_ERROR_BODY`]).
#[must_use]
pub fn recover(payload: Box<dyn Any + Send + 'static>, mode: RenderMode) -> Response {
    match payload.downcast::<Error>() {
        Ok(err) => {
            tracing::error!("{}", err.render(mode));
            (*err).into_response()
        }
        Err(other) => {
            tracing::error!("recovered from unexpected panic: {}", describe(other.as_ref()));
            plain_text(
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_BODY.to_owned(),
            )
        }
    }
}

fn describe(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

fn plain_text(status: StatusCode, body: String) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    response
}
