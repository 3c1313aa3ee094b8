//! Graceful shutdown driven by OS termination signals.
//!
//! [`ShutdownCoordinator`] moves through [`Phase::Idle`] → [`Phase::Listening`]
//! → [`Phase::Stopping`] → [`Phase::Terminated`] exactly once. Cancellation is
//! delegated to a caller-supplied callback (typically cancelling a
//! `tokio_util::sync::CancellationToken`); the coordinator never kills
//! in-flight work itself, it only waits the grace period and exits.

mod coordinator;


pub use coordinator::{
    DEFAULT_GRACE_PERIOD, EXIT_SUCCESS, Phase, SIGNAL_BUFFER, ShutdownCoordinator, ShutdownError,
    Signal, SignalSender,
};
