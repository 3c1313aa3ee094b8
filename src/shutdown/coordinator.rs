//! Signal-driven, one-shot shutdown lifecycle.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, watch};

/// Slots in the signal channel.
///
/// One is enough: a signal delivered before [`ShutdownCoordinator::run`]
/// starts waiting stays buffered, and any further signal is redundant.
pub const SIGNAL_BUFFER: usize = 1;

/// Default delay between cancellation and process exit.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(2);

/// Exit code used after a graceful shutdown.
pub const EXIT_SUCCESS: i32 = 0;

/// Termination signals the coordinator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// SIGINT / Ctrl+C
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => f.write_str("interrupt"),
            Self::Terminate => f.write_str("terminate"),
        }
    }
}

/// Lifecycle phases, in the only order they can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Created, OS handlers not installed yet
    Idle,
    /// Waiting for a signal
    Listening,
    /// Cancellation issued, grace period running
    Stopping,
    /// Exit hook invoked
    Terminated,
}

/// Error type for shutdown setup.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// Installing an OS signal handler failed.
    #[error("Failed to install {signal} handler: {source}")]
    SignalSetup {
        /// Signal whose handler could not be installed
        signal: Signal,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Cloneable handle that injects signals into a coordinator's channel.
#[derive(Debug, Clone)]
pub struct SignalSender {
    tx: mpsc::Sender<Signal>,
}

impl SignalSender {
    /// Delivers `signal` without waiting.
    ///
    /// Returns `false` when the buffer is already full (a shutdown is pending
    /// anyway) or the coordinator is gone.
    pub fn send(&self, signal: Signal) -> bool {
        self.tx.try_send(signal).is_ok()
    }
}

type ExitHook = Box<dyn FnOnce(i32) + Send>;

fn exit_process(code: i32) {
    std::process::exit(code)
}

/// Waits for a termination signal, cancels cooperating work, waits a grace
/// period, then ends the process.
///
/// The coordinator owns its signal channel; [`ShutdownCoordinator::sender`]
/// hands out injection handles so tests and the application itself can
/// trigger a shutdown without real OS signals.
///
/// Run it on its own task; it blocks that task until a signal arrives and is
/// consumed by [`ShutdownCoordinator::run`], so it cannot be restarted.
pub struct ShutdownCoordinator {
    tx: mpsc::Sender<Signal>,
    rx: mpsc::Receiver<Signal>,
    grace_period: Duration,
    phase: watch::Sender<Phase>,
    exit: ExitHook,
}

impl fmt::Debug for ShutdownCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShutdownCoordinator")
            .field("grace_period", &self.grace_period)
            .field("phase", &*self.phase.borrow())
            .finish_non_exhaustive()
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_GRACE_PERIOD)
    }
}

impl ShutdownCoordinator {
    /// Creates an idle coordinator that exits via [`std::process::exit`].
    #[must_use]
    pub fn new(grace_period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(SIGNAL_BUFFER);
        let (phase, _) = watch::channel(Phase::Idle);
        Self {
            tx,
            rx,
            grace_period,
            phase,
            exit: Box::new(exit_process),
        }
    }

    /// Replaces the exit hook (called once with [`EXIT_SUCCESS`]).
    #[must_use]
    pub fn with_exit<F>(mut self, exit: F) -> Self
    where
        F: FnOnce(i32) + Send + 'static,
    {
        self.exit = Box::new(exit);
        self
    }

    /// The configured grace period.
    #[must_use]
    pub const fn grace_period(&self) -> Duration {
        self.grace_period
    }

    /// A handle for injecting signals.
    #[must_use]
    pub fn sender(&self) -> SignalSender {
        SignalSender {
            tx: self.tx.clone(),
        }
    }

    /// Observes phase transitions.
    #[must_use]
    pub fn phases(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    /// Installs OS handlers for SIGINT and SIGTERM (Ctrl+C off unix) that
    /// forward into this coordinator's channel.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ShutdownError::SignalSetup`] if a handler cannot be installed.
    #[cfg(not(tarpaulin_include))]
    pub fn listen(&self) -> Result<(), ShutdownError> {
        self.install_handlers()?;
        self.phase.send_replace(Phase::Listening);
        tracing::debug!("Listening for termination signals");
        Ok(())
    }

    #[cfg(unix)]
    fn install_handlers(&self) -> Result<(), ShutdownError> {
        use tokio::signal::unix::{SignalKind, signal};

        for (kind, name) in [
            (SignalKind::interrupt(), Signal::Interrupt),
            (SignalKind::terminate(), Signal::Terminate),
        ] {
            let mut stream = signal(kind).map_err(|source| ShutdownError::SignalSetup {
                signal: name,
                source,
            })?;
            let sender = self.sender();
            tokio::spawn(async move {
                while stream.recv().await.is_some() {
                    sender.send(name);
                }
            });
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn install_handlers(&self) -> Result<(), ShutdownError> {
        let sender = self.sender();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                sender.send(Signal::Interrupt);
            }
        });
        Ok(())
    }

    /// Blocks until the first signal, then runs the stop sequence once:
    /// `cancel`, sleep for the grace period, exit with [`EXIT_SUCCESS`].
    ///
    /// Returns only if the exit hook returns (as test hooks do).
    pub async fn run<F>(mut self, cancel: F)
    where
        F: FnOnce() + Send,
    {
        let idle = *self.phase.borrow() == Phase::Idle;
        if idle {
            self.phase.send_replace(Phase::Listening);
        }

        // The coordinator holds a sender itself, so the channel never closes.
        let signal = self.rx.recv().await;
        match signal {
            Some(signal) => tracing::info!("Received {signal} signal, stopping execution..."),
            None => tracing::warn!("Signal channel closed, stopping execution..."),
        }

        self.phase.send_replace(Phase::Stopping);
        cancel();
        tracing::info!(
            "Cancellation issued, waiting {}ms before exit",
            self.grace_period.as_millis()
        );
        tokio::time::sleep(self.grace_period).await;

        self.phase.send_replace(Phase::Terminated);
        (self.exit)(EXIT_SUCCESS);
    }
}
