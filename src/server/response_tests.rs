//! Tests for JSON response writing.

use std::panic::{AssertUnwindSafe, catch_unwind};

use axum::Router;
use axum::body::Body;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde::Serialize;
use tower::ServiceExt;

use super::{JsonReply, recovery_layer, write_json};
use crate::error::{Error, RenderMode};

#[derive(Debug, Serialize)]
struct Ack {
    id: u32,
    accepted: bool,
}

struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("cannot serialize"))
    }
}

async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

mod success {
    use super::*;

    #[tokio::test]
    async fn writes_status_content_type_and_body() {
        let response = write_json(
            &Ack {
                id: 7,
                accepted: true,
            },
            StatusCode::CREATED,
        );

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[http::header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(body_bytes(response).await, br#"{"id":7,"accepted":true}"#);
    }

    #[tokio::test]
    async fn accepts_unsized_payloads() {
        let items: &[u8] = &[1, 2, 3];

        let response = write_json(items, StatusCode::OK);

        assert_eq!(body_bytes(response).await, b"[1,2,3]");
    }

    #[tokio::test]
    async fn json_reply_matches_write_json() {
        let response = JsonReply::new(serde_json::json!({"hello": "world"}), StatusCode::ACCEPTED)
            .into_response();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(body_bytes(response).await, br#"{"hello":"world"}"#);
    }

    #[test]
    fn json_reply_ok_uses_200() {
        assert_eq!(JsonReply::ok(1).status, StatusCode::OK);
    }
}

mod failure {
    use super::*;

    #[test]
    fn serialization_failure_raises_500_with_cause() {
        let payload = catch_unwind(AssertUnwindSafe(|| {
            write_json(&Unserializable, StatusCode::CREATED)
        }))
        .unwrap_err();
        let err = payload.downcast::<Error>().unwrap();

        assert_eq!(err.code(), 500);
        assert_eq!(err.message(), "Not possible to write 201 response");
        assert!(err.cause().unwrap().to_string().contains("cannot serialize"));
    }

    #[tokio::test]
    async fn serialization_failure_is_recovered_by_the_layer() {
        let app = Router::new()
            .route(
                "/",
                get(|| async { JsonReply::new(Unserializable, StatusCode::CREATED) }),
            )
            .layer(recovery_layer(RenderMode::Standard));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_bytes(response).await,
            b"Not possible to write 201 response"
        );
    }
}
