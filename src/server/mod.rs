//! HTTP server side of the toolkit, built on axum.
//!
//! This module provides:
//! - JSON response writing that raises on serialization failure ([`write_json`],
//!   [`JsonReply`])
//! - The recovery layer turning raised errors into HTTP responses
//!   ([`recovery_layer`], [`RecoverPanic`], [`recover`])
//! - Response status recording for observability ([`StatusRecorder`],
//!   [`record_status`], [`RecordedStatus`])
//!
//! # Layer order
//!
//! Install the recovery layer on every router that uses [`write_json`] or the
//! raise helpers from [`crate::error`], and put [`record_status`] outside it
//! so recovered statuses are counted:
//!
//! ```no_run
//! use axum::{Router, middleware, routing::get};
//! use hookkit::error::RenderMode;
//! use hookkit::server::{StatusRecorder, record_status, recovery_layer};
//!
//! let recorder = StatusRecorder::new();
//! let app: Router = Router::new()
//!     .route("/", get(|| async { "ok" }))
//!     .layer(recovery_layer(RenderMode::Standard))
//!     .layer(middleware::from_fn_with_state(recorder, record_status));
//! ```

mod recover;
mod response;
mod status;

#[cfg(test)]
mod recover_tests;
#[cfg(test)]
mod response_tests;
#[cfg(test)]
mod status_tests;

pub use recover::{INTERNAL_ERROR_BODY, RecoverPanic, recover, recovery_layer};
pub use response::{JsonReply, write_json};
pub use status::{RecordedStatus, StatusRecorder, record_status};
