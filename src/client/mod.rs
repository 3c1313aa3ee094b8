//! HTTP client side of the toolkit.
//!
//! This module provides:
//! - Request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - The transport abstraction ([`HttpClient`]) and its reqwest implementation
//!   ([`ReqwestClient`])
//! - The request executor bound to a base URL ([`Client`]) and the verb-level
//!   abstraction it implements ([`Api`])
//!
//! Failures cross this boundary only as returned values: transport errors
//! ([`HttpError`]) are folded into [`crate::error::Error`] by the executor.

mod error;
mod executor;
mod message;
mod transport;

#[cfg(test)]
mod transport_tests;

pub use error::HttpError;
pub use executor::{Api, Client};
pub use message::{HttpClient, HttpRequest, HttpResponse};
pub use transport::ReqwestClient;
