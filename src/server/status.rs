//! Response status recording.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use http::StatusCode;

/// Final status of a response, stored in its extensions by [`record_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedStatus(pub StatusCode);

/// Shared tally of response statuses.
///
/// Clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct StatusRecorder {
    counts: Arc<Mutex<BTreeMap<u16, u64>>>,
}

impl StatusRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one response with `status`.
    pub fn record(&self, status: StatusCode) {
        let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        *counts.entry(status.as_u16()).or_insert(0) += 1;
    }

    /// How many responses carried `status`.
    #[must_use]
    pub fn count(&self, status: StatusCode) -> u64 {
        self.snapshot().get(&status.as_u16()).copied().unwrap_or(0)
    }

    /// A copy of all counters, keyed by numeric status.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<u16, u64> {
        self.counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Middleware that forwards the request and records the response status.
///
/// Use with `axum::middleware::from_fn_with_state`.
pub async fn record_status(
    State(recorder): State<StatusRecorder>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let mut response = next.run(request).await;

    let status = response.status();
    recorder.record(status);
    response.extensions_mut().insert(RecordedStatus(status));
    tracing::debug!("{method} {path} -> {}", status.as_u16());

    response
}
