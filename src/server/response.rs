//! JSON response writing.

use axum::body::Body;
use axum::response::{IntoResponse, Response};
use http::header::{CONTENT_TYPE, HeaderValue};
use http::StatusCode;
use serde::Serialize;

use crate::error::{Error, raise};

/// Serializes `payload` as the JSON body of a response with `status`.
///
/// Serialization failure is raised, not returned: the handler unwinds with a
/// 500 [`Error`] whose cause is the serializer error, and the recovery layer
/// writes the error response. Callers must therefore run under
/// [`recovery_layer`](super::recovery_layer).
pub fn write_json<T>(payload: &T, status: StatusCode) -> Response
where
    T: Serialize + ?Sized,
{
    let body = match serde_json::to_vec(payload) {
        Ok(body) => body,
        Err(e) => raise(Error::with_cause(
            format!("Not possible to write {} response", status.as_u16()),
            StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            e,
        )),
    };

    tracing::info!(
        "{} response sent. Payload: {}",
        status.as_u16(),
        String::from_utf8_lossy(&body)
    );

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// A JSON payload paired with the status it should be sent with.
///
/// Returning this from a handler is equivalent to calling [`write_json`].
#[derive(Debug, Clone)]
pub struct JsonReply<T> {
    /// Value serialized into the body
    pub payload: T,
    /// Response status
    pub status: StatusCode,
}

impl<T> JsonReply<T> {
    /// Pairs `payload` with `status`.
    pub const fn new(payload: T, status: StatusCode) -> Self {
        Self { payload, status }
    }

    /// A `200 OK` reply.
    pub const fn ok(payload: T) -> Self {
        Self::new(payload, StatusCode::OK)
    }
}

impl<T: Serialize> IntoResponse for JsonReply<T> {
    fn into_response(self) -> Response {
        write_json(&self.payload, self.status)
    }
}
