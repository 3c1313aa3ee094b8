//! A small JSON webhook relay assembled from the rest of the toolkit.
//!
//! Routes:
//! - `GET /health` answers `{"status":"ok"}`
//! - `POST /echo[?status=N]` echoes a JSON body back with status `N` (default 200)
//! - `ANY /relay/{*path}` forwards the request to the upstream [`Client`](crate::client::Client)
//! - `GET /stats` reports how many responses were sent per status code
//!
//! Handlers use both propagation modes: `/echo` raises, `/relay` returns its
//! errors. Both end up as plain-text error responses.

mod handlers;
mod state;


pub use handlers::router;
pub use state::RelayState;
