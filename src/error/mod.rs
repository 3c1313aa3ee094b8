//! Structured errors shared by the client and server halves of the toolkit.
//!
//! This module provides:
//! - The structured error value ([`Error`])
//! - Explicit log rendering policy ([`RenderMode`])
//! - Raise-mode helpers that unwind to a recovery guard ([`raise`], [`raise_code`],
//!   [`panic_if_error`])
//!
//! # Propagation
//!
//! Library boundaries (the request executor) always return `Result<_, Error>`.
//! Response-writing helpers raise instead, and the server's recovery layer turns
//! the raised [`Error`] back into an HTTP response.

mod raise;
mod structured;


pub use raise::{panic_if_error, raise, raise_code};
pub use structured::{BoxError, Error, RenderMode};
