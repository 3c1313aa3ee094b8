//! Tests for the recovery layer.

use axum::Router;
use axum::body::Body;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use super::{INTERNAL_ERROR_BODY, recover, recovery_layer};
use crate::error::{Error, RenderMode, panic_if_error, raise, raise_code};

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn call(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn bad_input() -> Response {
    raise(Error::new("bad input", 400))
}

async fn leaky() -> Response {
    raise(Error::with_cause("bad input", 400, "db password is hunter2"))
}

async fn nested() -> Response {
    fn deep(raw: &str) -> u16 {
        panic_if_error("limit must be a number", 422, raw.parse::<u16>())
    }
    deep("ten").to_string().into_response()
}

async fn plain_panic() -> Response {
    panic!("index out of bounds")
}

async fn odd_payload() -> Response {
    std::panic::panic_any(42_u32)
}

async fn odd_code() -> Response {
    raise_code("teapot-ish", 1000)
}

async fn fine() -> &'static str {
    "fine"
}

async fn returned() -> Result<&'static str, Error> {
    Err(Error::new("not here", 404))
}

fn app() -> Router {
    Router::new()
        .route("/bad", get(bad_input))
        .route("/leaky", get(leaky))
        .route("/nested", get(nested))
        .route("/panic", get(plain_panic))
        .route("/odd", get(odd_payload))
        .route("/odd-code", get(odd_code))
        .route("/fine", get(fine))
        .route("/returned", get(returned))
        .layer(recovery_layer(RenderMode::Debug))
}

mod layer {
    use super::*;

    #[tokio::test]
    async fn raised_error_becomes_its_status_and_message() {
        let response = call(app(), "/bad").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "bad input");
    }

    #[tokio::test]
    async fn raised_error_is_plain_text() {
        let response = call(app(), "/bad").await;

        assert_eq!(
            response.headers()[http::header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            response.headers()[http::header::X_CONTENT_TYPE_OPTIONS],
            "nosniff"
        );
    }

    #[tokio::test]
    async fn cause_never_reaches_the_client() {
        let body = body_text(call(app(), "/leaky").await).await;

        assert_eq!(body, "bad input");
    }

    #[tokio::test]
    async fn raise_from_nested_helper_is_recovered() {
        let response = call(app(), "/nested").await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_text(response).await, "limit must be a number");
    }

    #[tokio::test]
    async fn string_panic_becomes_internal_error() {
        let response = call(app(), "/panic").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, INTERNAL_ERROR_BODY);
    }

    #[tokio::test]
    async fn arbitrary_payload_becomes_internal_error() {
        let response = call(app(), "/odd").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal Error");
    }

    #[tokio::test]
    async fn invalid_code_falls_back_to_500_with_message() {
        let response = call(app(), "/odd-code").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "teapot-ish");
    }

    #[tokio::test]
    async fn handler_without_panic_is_untouched() {
        let response = call(app(), "/fine").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "fine");
    }

    #[tokio::test]
    async fn returned_error_uses_the_same_shape() {
        let response = call(app(), "/returned").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "not here");
    }

    #[tokio::test]
    async fn router_keeps_serving_after_a_recovery() {
        let app = app();

        let first = call(app.clone(), "/panic").await;
        let second = call(app, "/fine").await;

        assert_eq!(first.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(second.status(), StatusCode::OK);
    }
}

mod payloads {
    use super::*;

    #[tokio::test]
    async fn error_payload_maps_directly() {
        let response = recover(Box::new(Error::new("bad input", 400)), RenderMode::Standard);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "bad input");
    }

    #[tokio::test]
    async fn owned_string_payload_is_not_leaked() {
        let response = recover(
            Box::new(String::from("secret internals")),
            RenderMode::Standard,
        );

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, INTERNAL_ERROR_BODY);
    }

    #[tokio::test]
    async fn boxed_error_payload_is_not_an_error_value() {
        let response = recover(Box::new(Box::new(Error::new("boxed", 400))), RenderMode::Standard);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
