//! Cooperative termination flag shared with the signal handler.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use signal_hook::consts::signal::SIGINT;
use thiserror::Error;

const RUNNING: usize = 0;
const QUIT: usize = 1;
const INTERRUPTED: usize = 2;

/// Why the reactor stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The operator quit or closed the input stream.
    Quit,
    /// An interrupt signal arrived.
    Interrupted,
}

/// Flag the reactor checks once per iteration.
///
/// The signal handler performs a single atomic store into the shared cell,
/// which is the only work it is allowed to do.
#[derive(Debug, Clone, Default)]
pub struct TerminationToken {
    state: Arc<AtomicUsize>,
}

impl TerminationToken {
    /// Builds a token in the running state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a graceful stop.
    pub fn quit(&self) {
        self.state.store(QUIT, Ordering::SeqCst);
    }

    /// Requests an immediate stop.
    pub fn interrupt(&self) {
        self.state.store(INTERRUPTED, Ordering::SeqCst);
    }

    /// Reason for stopping, once one has been raised.
    #[must_use]
    pub fn reason(&self) -> Option<Termination> {
        match self.state.load(Ordering::SeqCst) {
            RUNNING => None,
            INTERRUPTED => Some(Termination::Interrupted),
            _ => Some(Termination::Quit),
        }
    }

    /// Whether a stop has been requested.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.reason().is_some()
    }

    /// Routes SIGINT to [`TerminationToken::interrupt`].
    ///
    /// # Errors
    ///
    /// Returns [`SignalError`] when the handler cannot be installed.
    pub fn register_interrupt(&self) -> Result<(), SignalError> {
        signal_hook::flag::register_usize(SIGINT, Arc::clone(&self.state), INTERRUPTED)
            .map(|_| ())
            .map_err(|source| SignalError { source })
    }
}

/// Installing the interrupt handler failed.
#[derive(Debug, Error)]
#[error("failed to install interrupt handler: {source}")]
pub struct SignalError {
    #[source]
    source: io::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_running() {
        assert_eq!(TerminationToken::new().reason(), None);
    }

    #[test]
    fn clones_share_state() {
        let token = TerminationToken::new();
        let observer = token.clone();
        token.quit();
        assert_eq!(observer.reason(), Some(Termination::Quit));
        token.interrupt();
        assert_eq!(observer.reason(), Some(Termination::Interrupted));
    }

    #[test]
    fn interrupt_signal_raises_the_token() {
        let token = TerminationToken::new();
        token.register_interrupt().expect("install handler");
        signal_hook::low_level::raise(SIGINT).expect("raise signal");
        assert_eq!(token.reason(), Some(Termination::Interrupted));
    }
}
