//! Structured health reporting for console lifecycle events.

use std::net::SocketAddr;
use std::sync::Arc;

use fleet_config::Config;

use crate::bootstrap::BootstrapError;
use crate::connections::Connection;
use crate::reactor::Termination;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after the socket is bound.
    fn bootstrap_succeeded(&self, config: &Config, local: SocketAddr);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked when a datagram arrives from a peer not seen before.
    fn connection_opened(&self, connection: &Connection);

    /// Invoked when an oversized datagram is discarded.
    fn datagram_dropped(&self, peer: SocketAddr, size: usize);

    /// Invoked after the reactor has released every resource.
    fn shutdown_completed(&self, termination: Termination, released: usize);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config, local: SocketAddr) {
        (**self).bootstrap_succeeded(config, local);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn connection_opened(&self, connection: &Connection) {
        (**self).connection_opened(connection);
    }

    fn datagram_dropped(&self, peer: SocketAddr, size: usize) {
        (**self).datagram_dropped(peer, size);
    }

    fn shutdown_completed(&self, termination: Termination, released: usize) {
        (**self).shutdown_completed(termination, released);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting console bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config, local: SocketAddr) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            local = %local,
            block_size = config.block_size(),
            log_filter = %config.log_filter(),
            log_format = ?config.log_format(),
            "console bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "console bootstrap failed"
        );
    }

    fn connection_opened(&self, connection: &Connection) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "connection_opened",
            connection = %connection.id(),
            peer = %connection.peer(),
            "new peer"
        );
    }

    fn datagram_dropped(&self, peer: SocketAddr, size: usize) {
        tracing::warn!(
            target: HEALTH_TARGET,
            event = "datagram_dropped",
            peer = %peer,
            size,
            "received datagram exceeds the maximum packet size"
        );
    }

    fn shutdown_completed(&self, termination: Termination, released: usize) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "shutdown_completed",
            termination = ?termination,
            released,
            "console shut down"
        );
    }
}
