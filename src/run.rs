//! Application execution logic.
//!
//! This module binds the listener, serves the relay router and hands the
//! process lifetime over to the shutdown coordinator.

use std::io;
use std::net::SocketAddr;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use hookkit::config::ValidatedConfig;
use hookkit::relay::{RelayState, router};
use hookkit::shutdown::{ShutdownCoordinator, ShutdownError};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the upstream request executor.
    #[error("Failed to build upstream client: {}", .0.detailed())]
    Upstream(#[source] hookkit::error::Error),

    /// Failed to bind the listen address.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Address that could not be bound
        addr: SocketAddr,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Failed to install signal handlers.
    #[error(transparent)]
    Shutdown(#[from] ShutdownError),

    /// The server stopped with an I/O error.
    #[error("Server error: {0}")]
    Serve(#[source] io::Error),
}

/// Executes the application until a termination signal ends the process.
///
/// This function:
/// 1. Builds the relay state (and upstream executor, if configured)
/// 2. Binds the listen address
/// 3. Installs OS signal handlers
/// 4. Serves until the coordinator cancels, then lets it finish the grace period
///
/// # Errors
///
/// Returns an error if startup fails or the server stops with an I/O error.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it installs real signal
/// handlers; [`serve`] carries the testable part.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let app = router(build_state(&config)?, config.runtime_mode);

    let listener = TcpListener::bind(config.listen)
        .await
        .map_err(|source| RunError::Bind {
            addr: config.listen,
            source,
        })?;

    let coordinator = ShutdownCoordinator::new(config.grace_period);
    coordinator.listen()?;

    serve(listener, app, coordinator).await
}

/// Creates the relay state from configuration.
fn build_state(config: &ValidatedConfig) -> Result<RelayState, RunError> {
    let state = RelayState::new();
    match config.upstream {
        Some(ref upstream) => {
            let client = upstream.client().map_err(RunError::Upstream)?;
            tracing::info!("Relaying /relay/* to {}", client.base_url());
            Ok(state.with_upstream(client))
        }
        None => {
            tracing::info!("No upstream configured, /relay/* will answer 503");
            Ok(state)
        }
    }
}

/// Serves `app` on `listener` until `coordinator` receives a signal.
///
/// The coordinator cancels the server (in-flight requests drain, no new
/// connections are accepted), waits its grace period and invokes its exit hook.
/// Returns once both the server and the coordinator are done, which only
/// happens when the exit hook returns.
async fn serve(
    listener: TcpListener,
    app: Router,
    coordinator: ShutdownCoordinator,
) -> Result<(), RunError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Listening on http://{addr}");
    }

    let token = CancellationToken::new();
    let cancel = token.clone();
    let lifecycle = tokio::spawn(coordinator.run(move || cancel.cancel()));

    axum::serve(listener, app)
        .with_graceful_shutdown(token.cancelled_owned())
        .await
        .map_err(RunError::Serve)?;
    tracing::info!("Server stopped accepting connections");

    if let Err(e) = lifecycle.await {
        tracing::error!("Shutdown task failed: {e}");
    }
    Ok(())
}
