//! Test double for [`HealthReporter`] that records structured events for assertions.

use std::net::SocketAddr;
use std::sync::Mutex;

use fleet_config::Config;

use crate::bootstrap::BootstrapError;
use crate::connections::{Connection, ConnectionId};
use crate::health::HealthReporter;
use crate::reactor::Termination;

/// Structured health events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthEvent {
    BootstrapStarting,
    BootstrapSucceeded(SocketAddr),
    BootstrapFailed(String),
    ConnectionOpened(ConnectionId, SocketAddr),
    DatagramDropped(SocketAddr, usize),
    ShutdownCompleted {
        termination: Termination,
        released: usize,
    },
}

/// Records health events for assertions.
#[derive(Debug, Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config, local: SocketAddr) {
        self.record(HealthEvent::BootstrapSucceeded(local));
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn connection_opened(&self, connection: &Connection) {
        self.record(HealthEvent::ConnectionOpened(
            connection.id(),
            connection.peer(),
        ));
    }

    fn datagram_dropped(&self, peer: SocketAddr, size: usize) {
        self.record(HealthEvent::DatagramDropped(peer, size));
    }

    fn shutdown_completed(&self, termination: Termination, released: usize) {
        self.record(HealthEvent::ShutdownCompleted {
            termination,
            released,
        });
    }
}
