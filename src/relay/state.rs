//! Shared state for the relay routes.

use std::sync::Arc;

use crate::client::Client;
use crate::server::StatusRecorder;

/// State handed to every relay handler.
///
/// Cloning is cheap: the executor sits behind an `Arc` and the recorder
/// shares its counters.
#[derive(Debug, Clone, Default)]
pub struct RelayState {
    upstream: Option<Arc<Client>>,
    recorder: StatusRecorder,
}

impl RelayState {
    /// State without an upstream; `/relay/*` answers 503.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forwards `/relay/*` through `client`.
    #[must_use]
    pub fn with_upstream(mut self, client: Client) -> Self {
        self.upstream = Some(Arc::new(client));
        self
    }

    /// Counts responses into `recorder` instead of a private one.
    #[must_use]
    pub fn with_recorder(mut self, recorder: StatusRecorder) -> Self {
        self.recorder = recorder;
        self
    }

    /// The upstream executor, if configured.
    #[must_use]
    pub fn upstream(&self) -> Option<&Client> {
        self.upstream.as_deref()
    }

    /// The status tally backing `/stats`.
    #[must_use]
    pub const fn recorder(&self) -> &StatusRecorder {
        &self.recorder
    }
}
