//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Default listen port.
pub const LISTEN_PORT: u16 = 8080;

/// Default grace period between cancellation and exit, in seconds.
pub const GRACE_PERIOD_SECS: u64 = 2;

/// Largest accepted grace period, in seconds.
pub const MAX_GRACE_PERIOD_SECS: u64 = 300;

/// Default upstream request timeout, in seconds.
pub const UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Default `Accept` header for upstream requests.
pub const ACCEPT: &str = "application/json";

/// Default `Content-Type` header for upstream requests with a body.
pub const CONTENT_TYPE: &str = "application/json";

/// Default `User-Agent` header for upstream requests.
pub const USER_AGENT: &str = concat!("hookkit/", env!("CARGO_PKG_VERSION"));

/// Default listen address (loopback only).
#[must_use]
pub const fn listen() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), LISTEN_PORT)
}

/// Default grace period as Duration.
#[must_use]
pub const fn grace_period() -> Duration {
    Duration::from_secs(GRACE_PERIOD_SECS)
}

/// Default upstream timeout as Duration.
#[must_use]
pub const fn upstream_timeout() -> Duration {
    Duration::from_secs(UPSTREAM_TIMEOUT_SECS)
}
