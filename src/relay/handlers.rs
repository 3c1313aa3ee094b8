//! Route handlers and router assembly.

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::{Query, State};
use axum::middleware;
use axum::response::Response;
use axum::routing::{any, get, post};
use http::header::CONTENT_TYPE;
use http::uri::PathAndQuery;
use http::{Method, StatusCode, Uri};
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use crate::error::{Error, RenderMode, panic_if_error};
use crate::server::{JsonReply, record_status, recovery_layer, write_json};

use super::RelayState;

const RELAY_PREFIX: &str = "/relay/";

/// Builds the relay router.
///
/// Recovery wraps the handlers and status recording wraps recovery, so
/// recovered statuses show up in `/stats`.
pub fn router(state: RelayState, mode: RenderMode) -> Router {
    let recorder = state.recorder().clone();

    Router::new()
        .route("/health", get(health))
        .route("/echo", post(echo))
        .route("/relay/{*path}", any(relay))
        .route("/stats", get(stats))
        .with_state(state)
        .layer(recovery_layer(mode))
        .layer(middleware::from_fn_with_state(recorder, record_status))
}

async fn health() -> JsonReply<Value> {
    JsonReply::ok(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
struct EchoParams {
    status: Option<String>,
}

async fn echo(Query(params): Query<EchoParams>, body: Bytes) -> Response {
    let status = params.status.as_deref().map_or(StatusCode::OK, parse_status);
    let payload: Value = panic_if_error(
        "request body is not valid JSON",
        400,
        serde_json::from_slice(&body),
    );

    write_json(&payload, status)
}

fn parse_status(raw: &str) -> StatusCode {
    let message = format!("invalid status '{raw}'");
    let code = panic_if_error(message.as_str(), 400, raw.trim().parse::<u16>());
    panic_if_error(message, 400, StatusCode::from_u16(code))
}

async fn relay(
    State(state): State<RelayState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, Error> {
    let client = state.upstream().ok_or_else(|| {
        Error::from_status(
            "relay upstream is not configured",
            StatusCode::SERVICE_UNAVAILABLE,
        )
    })?;

    // Keep the raw, still percent-encoded target so the upstream sees it verbatim
    let target = uri
        .path_and_query()
        .map(PathAndQuery::as_str)
        .and_then(|pq| pq.strip_prefix(RELAY_PREFIX))
        .unwrap_or_default();

    let url = client.resolve(target)?;
    confine(client.base_url(), &url)?;

    tracing::info!("Relaying {method} /{target} to {url}");
    let upstream = client
        .execute(url.as_str(), method.as_str(), Some(body.to_vec()))
        .await?;

    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    if let Some(content_type) = upstream.headers.get(CONTENT_TYPE) {
        response
            .headers_mut()
            .insert(CONTENT_TYPE, content_type.clone());
    }
    Ok(response)
}

/// Rejects targets that resolve outside the upstream's origin or base directory.
///
/// Absolute and scheme-relative references, `..` segments and leading slashes
/// all resolve to something `Url::join` accepts, so the check runs on the
/// resolved URL.
fn confine(base: &Url, url: &Url) -> Result<(), Error> {
    let base_dir = base
        .path()
        .rfind('/')
        .map_or("/", |end| &base.path()[..=end]);

    let same_origin = url.scheme() == base.scheme()
        && url.host_str() == base.host_str()
        && url.port_or_known_default() == base.port_or_known_default();

    if same_origin && url.path().starts_with(base_dir) {
        Ok(())
    } else {
        Err(Error::from_status(
            "relay target must stay under the configured upstream",
            StatusCode::BAD_REQUEST,
        ))
    }
}

async fn stats(State(state): State<RelayState>) -> Response {
    write_json(&state.recorder().snapshot(), StatusCode::OK)
}
