//! Tests for response status recording.

use axum::Router;
use axum::body::Body;
use axum::middleware;
use axum::response::Response;
use axum::routing::get;
use http::{Request, StatusCode};
use tower::ServiceExt;

use super::{RecordedStatus, StatusRecorder, record_status, recovery_layer};
use crate::error::{RenderMode, raise_code};

async fn raised() -> Response {
    raise_code("bad input", 400)
}

fn app(recorder: &StatusRecorder) -> Router {
    Router::new()
        .route("/ok", get(|| async { "ok" }))
        .route(
            "/teapot",
            get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }),
        )
        .route("/raise", get(raised))
        .layer(recovery_layer(RenderMode::Standard))
        .layer(middleware::from_fn_with_state(
            recorder.clone(),
            record_status,
        ))
}

async fn status_of(app: Router, uri: &str) -> (StatusCode, Option<RecordedStatus>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    (
        response.status(),
        response.extensions().get::<RecordedStatus>().copied(),
    )
}

mod recorder {
    use super::*;

    #[test]
    fn starts_empty() {
        assert!(StatusRecorder::new().snapshot().is_empty());
    }

    #[test]
    fn clones_share_counters() {
        let recorder = StatusRecorder::new();
        let clone = recorder.clone();

        clone.record(StatusCode::OK);
        recorder.record(StatusCode::OK);
        recorder.record(StatusCode::NOT_FOUND);

        assert_eq!(recorder.count(StatusCode::OK), 2);
        assert_eq!(clone.count(StatusCode::NOT_FOUND), 1);
        assert_eq!(recorder.count(StatusCode::BAD_GATEWAY), 0);
    }
}

mod middleware_fn {
    use super::*;

    #[tokio::test]
    async fn records_handler_status() {
        let recorder = StatusRecorder::new();

        let (status, recorded) = status_of(app(&recorder), "/teapot").await;

        assert_eq!(status, StatusCode::IM_A_TEAPOT);
        assert_eq!(recorded, Some(RecordedStatus(StatusCode::IM_A_TEAPOT)));
        assert_eq!(recorder.count(StatusCode::IM_A_TEAPOT), 1);
    }

    #[tokio::test]
    async fn records_recovered_status() {
        let recorder = StatusRecorder::new();

        let (status, recorded) = status_of(app(&recorder), "/raise").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(recorded, Some(RecordedStatus(StatusCode::BAD_REQUEST)));
        assert_eq!(recorder.count(StatusCode::BAD_REQUEST), 1);
    }

    #[tokio::test]
    async fn records_unmatched_routes() {
        let recorder = StatusRecorder::new();

        status_of(app(&recorder), "/ok").await;
        status_of(app(&recorder), "/nowhere").await;

        assert_eq!(recorder.count(StatusCode::OK), 1);
        assert_eq!(recorder.count(StatusCode::NOT_FOUND), 1);
    }
}
