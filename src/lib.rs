//! hookkit: a small toolkit for HTTP webhook clients and servers
//!
//! - [`client`]: a request executor bound to a base URL, over a pluggable transport
//! - [`error`]: a structured error that can be returned or raised
//! - [`server`]: axum helpers that write JSON and recover raised errors
//! - [`shutdown`]: signal-driven graceful shutdown
//! - [`relay`]: a demo relay service wiring the pieces together
//! - [`config`]: configuration for the `hookkit` binary

pub mod client;
pub mod config;
pub mod error;
pub mod relay;
pub mod server;
pub mod shutdown;
